//! Authentication Module
//!
//! YouTube API 認証関連の機能

pub mod access_token;

pub use access_token::load_access_token;
