//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **ResumableUploadDriver**: 1ファイルの resumable アップロード
//! - **UploadVideosUseCase**: 複数ファイルのアップロードとマニフェスト更新
//! - **LinkCatalogUseCase**: ビューアのカタログへの動画IDの反映

pub mod drive_upload;
pub mod link_catalog;
pub mod upload_videos;
