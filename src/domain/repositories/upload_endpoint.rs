//! # Upload Endpoint Trait
//!
//! resumable アップロードを受け付けるリモートエンドポイントを抽象化

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::upload_result::UploadResult;
use crate::domain::entities::video_metadata::VideoMetadata;
use crate::domain::errors::UploadError;

/// チャンク送信の結果
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkOutcome {
    /// 途中まで受信された。`offset` はリモートが受信確認した次のバイト位置
    Progress { offset: u64 },
    /// アップロード完了。作成されたリソースを含む
    Completed(UploadResult),
}

/// アップロードエンドポイント
///
/// 一時的な失敗は `UploadError::is_transient()` が `true` になるエラーで返す。
#[async_trait]
pub trait UploadEndpoint: Send + Sync {
    /// resumable セッションのハンドル。ドロップ時に解放される
    type Session: Send + Sync;

    /// セッションを作成する
    ///
    /// # Arguments
    ///
    /// * `metadata` - 作成するリソースのメタデータ
    /// * `size` - アップロードする総バイト数
    async fn create_session(
        &self,
        metadata: &VideoMetadata,
        size: u64,
    ) -> Result<Self::Session, UploadError>;

    /// `offset` から始まるチャンクを送信する
    ///
    /// # Arguments
    ///
    /// * `session` - セッションハンドル
    /// * `offset` - チャンクの先頭バイト位置
    /// * `chunk` - チャンクのバイト列（最終チャンクは短い、空ファイルは空）
    /// * `total` - 総バイト数
    async fn send_chunk(
        &self,
        session: &Self::Session,
        offset: u64,
        chunk: Bytes,
        total: u64,
    ) -> Result<ChunkOutcome, UploadError>;
}
