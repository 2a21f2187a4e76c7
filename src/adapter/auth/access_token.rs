//! Access Token
//!
//! 発行済みの OAuth アクセストークンを環境変数から読み込む

use anyhow::{bail, Result};

/// Reads a bearer token from the named environment variable.
///
/// The token must already carry the `youtube.upload` scope; no authorization
/// flow is run here.
pub fn load_access_token(env_var: &str) -> Result<String> {
    let token = match std::env::var(env_var) {
        Ok(token) => token,
        Err(_) => bail!(
            "Access token not found: set {} to an OAuth access token with the youtube.upload scope",
            env_var
        ),
    };

    let token = token.trim();
    if token.is_empty() {
        bail!("Access token in {} is empty", env_var);
    }

    Ok(token.to_string())
}
