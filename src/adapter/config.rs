//! Configuration
//!
//! 設定ファイル（JSON）の読み込み

use anyhow::{bail, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use crate::adapter::youtube::client::DEFAULT_API_BASE_URL;
use crate::application::dto::upload_config::UploadConfig;
use crate::domain::entities::video_metadata::PrivacyStatus;
use crate::domain::services::retry_policy::{
    RetryPolicy, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_SECS,
};

/// 1 MiB, the chunk size the uploads have always used
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;
/// YouTube requires non-final chunks to be a multiple of this
pub const CHUNK_GRANULARITY: u64 = 256 * 1024;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Where upload results are recorded
    pub manifest_path: String,
    /// Viewer catalog (`videos.json`) whose overlays get the uploaded video ids
    pub catalog_path: Option<String>,

    // Transfer
    pub chunk_size: u64,
    pub max_retries: u32,
    pub retry_delay_secs: u64,

    // Video metadata ({name} is replaced by the file stem)
    pub title_template: String,
    pub description_template: String,
    pub tags: Vec<String>,
    pub category_id: String,
    pub privacy_status: PrivacyStatus,
    pub content_type: String,

    // Authentication
    pub access_token_env: String,
    pub api_base_url: String,

    pub enable_deduplication: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_path: "./youtube-uploads.json".to_string(),
            catalog_path: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
            title_template: "{name}".to_string(),
            description_template: "File: {name}".to_string(),
            tags: Vec::new(),
            category_id: "22".to_string(),
            privacy_status: PrivacyStatus::Unlisted,
            content_type: "video/*".to_string(),
            access_token_env: "YOUTUBE_ACCESS_TOKEN".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            enable_deduplication: true,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let content = fs::read_to_string(expanded.as_ref())
            .with_context(|| format!("Failed to read config file: {}", expanded))?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            bail!("chunk_size must be a positive integer");
        }
        if self.chunk_size % CHUNK_GRANULARITY != 0 {
            warn!(
                "chunk_size {} is not a multiple of {} bytes; the API may reject it",
                self.chunk_size, CHUNK_GRANULARITY
            );
        }
        if self.access_token_env.trim().is_empty() {
            bail!("access_token_env must name an environment variable");
        }
        Ok(())
    }

    /// Manifest path with `~` expanded
    pub fn manifest_path(&self) -> String {
        shellexpand::tilde(&self.manifest_path).to_string()
    }

    /// Catalog path with `~` expanded
    pub fn catalog_path(&self) -> Option<String> {
        self.catalog_path
            .as_deref()
            .map(|path| shellexpand::tilde(path).to_string())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_secs(self.retry_delay_secs),
        )
    }

    pub fn to_upload_config(&self) -> UploadConfig {
        UploadConfig::new(
            self.chunk_size,
            self.retry_policy(),
            self.title_template.clone(),
            self.description_template.clone(),
            self.tags.clone(),
            self.category_id.clone(),
            self.privacy_status,
            self.enable_deduplication,
        )
    }
}
