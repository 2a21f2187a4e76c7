//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **UploadTarget**: アップロード対象の不変な記述子
//! - **UploadSession**: アップロード中の可変な進捗状態
//! - **UploadResult**: アップロード成功時のリモートリソース
//! - **UploadProgress**: 進捗通知
//! - **VideoMetadata**: 動画作成時のメタデータ
//! - **VideoEntry**: マニフェストの記録

pub mod upload_progress;
pub mod upload_result;
pub mod upload_session;
pub mod upload_target;
pub mod video_entry;
pub mod video_metadata;
