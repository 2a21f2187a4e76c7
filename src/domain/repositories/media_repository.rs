//! # Media Repository Trait
//!
//! アップロード元メディアのオープンとチャンク読み込みを抽象化

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;

use crate::domain::errors::UploadError;

/// チャンク単位で読み出せるソース
///
/// ドロップ時にハンドルが閉じられる。
#[async_trait]
pub trait ChunkSource: Send {
    /// `offset` から `len` バイトを読む
    async fn read_chunk(&mut self, offset: u64, len: usize) -> Result<Bytes, UploadError>;
}

/// オープン済みのメディア
#[derive(Debug)]
pub struct OpenedMedia<S> {
    pub source: S,
    /// 総バイト数
    pub size: u64,
}

/// メディアリポジトリ
#[async_trait]
pub trait MediaRepository: Send + Sync {
    type Source: ChunkSource + 'static;

    /// メディアファイルを開く
    ///
    /// # Errors
    ///
    /// ファイルが存在しない、または通常ファイルでない場合にエラーを返す
    async fn open(&self, path: &Path) -> Result<OpenedMedia<Self::Source>>;
}
