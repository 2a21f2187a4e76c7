//! # Manifest Repository Trait
//!
//! アップロード結果マニフェストの永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::video_entry::VideoEntry;

/// アップロードマニフェスト
///
/// どの動画がアップロード済みかを記録する
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadManifest {
    /// アップロード済み動画（記録順）
    pub videos: Vec<VideoEntry>,
}

impl UploadManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// 元ファイルパスがアップロード済みかどうかを確認
    pub fn is_uploaded(&self, original_file_path: &str) -> bool {
        self.videos
            .iter()
            .any(|video| video.original_file_path == original_file_path)
    }

    /// 次に割り当てる通し番号
    pub fn next_id(&self) -> usize {
        self.videos.iter().map(|video| video.id).max().unwrap_or(0) + 1
    }

    /// アップロード済み動画を追加
    pub fn add_uploaded(&mut self, videos: Vec<VideoEntry>) {
        self.videos.extend(videos);
    }

    /// アップロード総数
    pub fn total_uploaded(&self) -> usize {
        self.videos.len()
    }
}

/// マニフェストリポジトリ
#[async_trait]
pub trait ManifestRepository: Send + Sync {
    /// マニフェストを読み込む（存在しなければ空）
    async fn load(&self, path: &str) -> Result<UploadManifest>;

    /// マニフェストを保存する
    async fn save(&self, path: &str, manifest: &UploadManifest) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: usize, path: &str) -> VideoEntry {
        VideoEntry {
            id,
            video_id: format!("vid-{}", id),
            title: "t".to_string(),
            description: "d".to_string(),
            thumbnail_url: "u".to_string(),
            original_file_path: path.to_string(),
            upload_date: "2024-12-25T10:00:00Z".to_string(),
            channel_id: String::new(),
            channel_title: String::new(),
        }
    }

    #[test]
    fn test_new_manifest() {
        let manifest = UploadManifest::new();

        assert!(manifest.videos.is_empty());
        assert_eq!(manifest.total_uploaded(), 0);
        assert_eq!(manifest.next_id(), 1);
    }

    #[test]
    fn test_is_uploaded() {
        let mut manifest = UploadManifest::new();
        manifest.videos.push(entry(1, "overlays/a.webm"));

        assert!(manifest.is_uploaded("overlays/a.webm"));
        assert!(!manifest.is_uploaded("overlays/b.webm"));
    }

    #[test]
    fn test_add_uploaded() {
        let mut manifest = UploadManifest::new();
        manifest.add_uploaded(vec![entry(1, "a.webm"), entry(2, "b.webm")]);

        assert_eq!(manifest.total_uploaded(), 2);
        assert_eq!(manifest.next_id(), 3);
        assert!(manifest.is_uploaded("b.webm"));
    }

    #[test]
    fn test_next_id_uses_max_id() {
        let mut manifest = UploadManifest::new();
        manifest.videos.push(entry(7, "a.webm"));
        manifest.videos.push(entry(2, "b.webm"));

        assert_eq!(manifest.next_id(), 8);
    }
}
