//! File Media Repository Implementation
//!
//! MediaRepositoryのローカルファイル実装

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use log::debug;
use std::io::SeekFrom;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::domain::errors::UploadError;
use crate::domain::repositories::media_repository::{ChunkSource, MediaRepository, OpenedMedia};

/// ローカルファイルシステムからメディアを開くリポジトリ
pub struct FileMediaRepository;

impl FileMediaRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileMediaRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// オープン済みのファイル
///
/// 読み込み位置を覚えておき、連続したチャンクでは seek を省く。
pub struct FileSource {
    file: File,
    position: u64,
}

#[async_trait]
impl ChunkSource for FileSource {
    async fn read_chunk(&mut self, offset: u64, len: usize) -> Result<Bytes, UploadError> {
        if self.position != offset {
            self.file.seek(SeekFrom::Start(offset)).await?;
            self.position = offset;
        }

        let mut buffer = BytesMut::zeroed(len);
        self.file.read_exact(&mut buffer).await?;
        self.position += len as u64;

        Ok(buffer.freeze())
    }
}

#[async_trait]
impl MediaRepository for FileMediaRepository {
    type Source = FileSource;

    async fn open(&self, path: &Path) -> Result<OpenedMedia<FileSource>> {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();

        let file = File::open(&expanded)
            .await
            .with_context(|| format!("Failed to open media file: {}", expanded))?;
        let metadata = file
            .metadata()
            .await
            .with_context(|| format!("Failed to stat media file: {}", expanded))?;

        if !metadata.is_file() {
            bail!("Not a regular file: {}", expanded);
        }

        debug!("Opened {} ({} bytes)", expanded, metadata.len());

        Ok(OpenedMedia {
            source: FileSource { file, position: 0 },
            size: metadata.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn media_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[tokio::test]
    async fn test_open_reports_size() {
        let file = media_file(b"0123456789");

        let opened = FileMediaRepository::new().open(file.path()).await.unwrap();

        assert_eq!(opened.size, 10);
    }

    #[tokio::test]
    async fn test_read_sequential_chunks() {
        let file = media_file(b"0123456789");
        let mut opened = FileMediaRepository::new().open(file.path()).await.unwrap();

        let first = opened.source.read_chunk(0, 4).await.unwrap();
        let second = opened.source.read_chunk(4, 4).await.unwrap();
        let last = opened.source.read_chunk(8, 2).await.unwrap();

        assert_eq!(&first[..], b"0123");
        assert_eq!(&second[..], b"4567");
        assert_eq!(&last[..], b"89");
    }

    #[tokio::test]
    async fn test_read_rewinds_to_earlier_offset() {
        let file = media_file(b"0123456789");
        let mut opened = FileMediaRepository::new().open(file.path()).await.unwrap();

        opened.source.read_chunk(0, 8).await.unwrap();
        let resent = opened.source.read_chunk(6, 4).await.unwrap();

        assert_eq!(&resent[..], b"6789");
    }

    #[tokio::test]
    async fn test_read_zero_length() {
        let file = media_file(b"");
        let mut opened = FileMediaRepository::new().open(file.path()).await.unwrap();

        assert_eq!(opened.size, 0);
        assert!(opened.source.read_chunk(0, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_past_end_is_source_error() {
        let file = media_file(b"0123");
        let mut opened = FileMediaRepository::new().open(file.path()).await.unwrap();

        let error = opened.source.read_chunk(2, 4).await.unwrap_err();

        assert!(matches!(error, UploadError::Source(_)));
        assert!(!error.is_transient());
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let result = FileMediaRepository::new()
            .open(Path::new("/nonexistent/overlay.webm"))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_open_directory_is_rejected() {
        let dir = TempDir::new().unwrap();

        let result = FileMediaRepository::new().open(dir.path()).await;

        assert!(result.is_err());
    }
}
