//! Adapter Layer
//!
//! 外部システム（YouTube Data API, ファイルシステム, 環境変数）との統合

pub mod auth;
pub mod clock;
pub mod config;
pub mod progress;
pub mod repositories;
pub mod youtube;
