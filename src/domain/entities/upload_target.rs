//! # UploadTarget Value Object
//!
//! アップロード対象1件の不変な記述子

use super::video_metadata::VideoMetadata;
use crate::domain::errors::UploadError;

/// アップロード対象
///
/// ソースハンドル、総バイト数、チャンクサイズ、作成用メタデータを保持する。
/// 構築後は変更されず、`ResumableUploadDriver::drive` に消費される。
#[derive(Debug)]
pub struct UploadTarget<S> {
    source: S,
    size: u64,
    chunk_size: u64,
    metadata: VideoMetadata,
}

impl<S> UploadTarget<S> {
    /// 新しいアップロード対象を作成
    ///
    /// # Errors
    ///
    /// `chunk_size` が 0 の場合は `UploadError::InvalidTarget`
    pub fn new(
        source: S,
        size: u64,
        chunk_size: u64,
        metadata: VideoMetadata,
    ) -> Result<Self, UploadError> {
        if chunk_size == 0 {
            return Err(UploadError::InvalidTarget(
                "chunk size must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            source,
            size,
            chunk_size,
            metadata,
        })
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// `offset` から送るべきチャンクの長さ（最終チャンクは残りバイト数に切り詰める）
    pub fn chunk_len_at(&self, offset: u64) -> usize {
        let remaining = self.size.saturating_sub(offset);
        remaining.min(self.chunk_size) as usize
    }

    /// ソースへの可変参照（チャンク読み込み用）
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
