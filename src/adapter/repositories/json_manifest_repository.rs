//! JSON Manifest Repository Implementation
//!
//! ManifestRepositoryのJSON実装（アップロード結果をJSON配列で永続化）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::fs;
use std::path::Path;

use crate::domain::entities::video_entry::VideoEntry;
use crate::domain::repositories::manifest_repository::{ManifestRepository, UploadManifest};

/// JSONファイルベースのマニフェストリポジトリ
pub struct JsonManifestRepository;

impl JsonManifestRepository {
    pub fn new() -> Self {
        Self
    }

    /// ファイルからマニフェストを読み込む（同期処理）
    fn load_sync(path: &str) -> Result<Vec<VideoEntry>> {
        let path = Path::new(path);

        if !path.exists() {
            info!("No existing upload manifest found, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path).context("Failed to read upload manifest")?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let videos: Vec<VideoEntry> =
            serde_json::from_str(&content).context("Failed to parse upload manifest JSON")?;

        info!("Loaded upload manifest: {} videos recorded", videos.len());

        Ok(videos)
    }

    /// ファイルにマニフェストを保存する（同期処理）
    fn save_sync(path: &str, videos: &[VideoEntry]) -> Result<()> {
        let path = Path::new(path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create manifest directory")?;
        }

        let json =
            serde_json::to_string_pretty(videos).context("Failed to serialize upload manifest")?;

        fs::write(path, json).context("Failed to write upload manifest")?;

        info!("Saved upload manifest: {} videos recorded", videos.len());

        Ok(())
    }
}

#[async_trait]
impl ManifestRepository for JsonManifestRepository {
    async fn load(&self, path: &str) -> Result<UploadManifest> {
        let path = path.to_string();
        let videos = tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(UploadManifest { videos })
    }

    async fn save(&self, path: &str, manifest: &UploadManifest) -> Result<()> {
        let path = path.to_string();
        let videos = manifest.videos.clone();
        tokio::task::spawn_blocking(move || Self::save_sync(&path, &videos))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(())
    }
}

impl Default for JsonManifestRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn entry(id: usize, path: &str) -> VideoEntry {
        VideoEntry {
            id,
            video_id: format!("vid-{}", id),
            title: format!("Overlay - {}", id),
            description: "File: clip".to_string(),
            thumbnail_url: format!("https://img.youtube.com/vi/vid-{}/mqdefault.jpg", id),
            original_file_path: path.to_string(),
            upload_date: "2024-12-25T10:00:00Z".to_string(),
            channel_id: "UC-1".to_string(),
            channel_title: "Lab".to_string(),
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let videos = JsonManifestRepository::load_sync("/nonexistent/path/uploads.json").unwrap();
        assert!(videos.is_empty());
    }

    #[test]
    fn test_load_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let videos = JsonManifestRepository::load_sync(file.path().to_str().unwrap()).unwrap();
        assert!(videos.is_empty());
    }

    #[test]
    fn test_load_existing_manifest() {
        let mut file = NamedTempFile::new().unwrap();
        let json = r#"[
            {
                "id": 1,
                "videoId": "abc123",
                "title": "LCN Heatmap Overlay - group1",
                "description": "File: group1",
                "thumbnailUrl": "https://img.youtube.com/vi/abc123/mqdefault.jpg",
                "originalFilePath": "overlays/group1.webm",
                "uploadDate": "2024-12-25T10:00:00Z"
            }
        ]"#;
        file.write_all(json.as_bytes()).unwrap();

        let videos = JsonManifestRepository::load_sync(file.path().to_str().unwrap()).unwrap();

        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].video_id, "abc123");
        assert_eq!(videos[0].original_file_path, "overlays/group1.webm");
        assert_eq!(videos[0].channel_id, "");
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ \"videos\": ").unwrap();

        assert!(JsonManifestRepository::load_sync(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("public").join("youtube-uploads.json");

        JsonManifestRepository::save_sync(path.to_str().unwrap(), &[entry(1, "a.webm")]).unwrap();

        assert!(path.exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.trim_start().starts_with('['));
        assert!(content.contains("\"originalFilePath\": \"a.webm\""));
    }

    #[tokio::test]
    async fn test_save_and_load_appended_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("uploads.json");
        let path = path.to_str().unwrap();
        let repository = JsonManifestRepository::new();

        let mut manifest = repository.load(path).await.unwrap();
        manifest.add_uploaded(vec![entry(1, "a.webm")]);
        repository.save(path, &manifest).await.unwrap();

        let mut manifest = repository.load(path).await.unwrap();
        let next = manifest.next_id();
        manifest.add_uploaded(vec![entry(next, "b.webm")]);
        repository.save(path, &manifest).await.unwrap();

        let loaded = repository.load(path).await.unwrap();
        assert_eq!(loaded.total_uploaded(), 2);
        assert_eq!(loaded.videos[1].id, 2);
        assert!(loaded.is_uploaded("a.webm"));
        assert!(loaded.is_uploaded("b.webm"));
    }
}
