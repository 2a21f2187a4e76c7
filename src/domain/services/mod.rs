//! # Domain Services
//!
//! エンティティに属さないビジネスルール
//!
//! - **retry_policy**: 固定間隔バックオフのリトライ判定
//! - **catalog_linker**: カタログのオーバーレイへの動画ID書き込み
//! - **deduplication**: アップロード済みファイルの除外

pub mod catalog_linker;
pub mod deduplication;
pub mod retry_policy;
