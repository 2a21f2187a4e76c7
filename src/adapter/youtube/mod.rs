//! YouTube Adapter Modules
//!
//! YouTube Data API の resumable アップロード統合

pub mod client;
pub mod models;
