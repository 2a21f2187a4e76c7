//! JSON Catalog Repository Implementation
//!
//! CatalogRepositoryのJSON実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::domain::repositories::catalog_repository::CatalogRepository;

/// JSONファイルベースのカタログリポジトリ
pub struct JsonCatalogRepository;

impl JsonCatalogRepository {
    pub fn new() -> Self {
        Self
    }

    fn load_sync(path: &str) -> Vec<Value> {
        let file = Path::new(path);

        if !file.exists() {
            warn!("Catalog {} does not exist, creating a new file", path);
            println!("⚠ {} does not exist. Creating a new file.", path);
            return Vec::new();
        }

        let parsed = fs::read_to_string(file)
            .context("Failed to read catalog")
            .and_then(|content| {
                serde_json::from_str::<Vec<Value>>(&content)
                    .context("Catalog is not a JSON array")
            });

        match parsed {
            Ok(catalog) => {
                info!("Loaded catalog: {} videos", catalog.len());
                catalog
            }
            Err(e) => {
                warn!("Error reading catalog {}: {:#}", path, e);
                println!("⚠ Error reading {}: {:#}", path, e);
                Vec::new()
            }
        }
    }

    fn save_sync(path: &str, catalog: &[Value]) -> Result<()> {
        let file = Path::new(path);

        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).context("Failed to create catalog directory")?;
        }

        let json = serde_json::to_string_pretty(catalog).context("Failed to serialize catalog")?;
        fs::write(file, json).with_context(|| format!("Failed to write catalog: {}", path))?;

        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for JsonCatalogRepository {
    async fn load(&self, path: &str) -> Result<Vec<Value>> {
        let path = path.to_string();
        let catalog = tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?;

        Ok(catalog)
    }

    async fn save(&self, path: &str, catalog: &[Value]) -> Result<()> {
        let path = path.to_string();
        let catalog = catalog.to_vec();
        tokio::task::spawn_blocking(move || Self::save_sync(&path, &catalog))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(())
    }
}

impl Default for JsonCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_missing_catalog_is_empty() {
        let catalog = JsonCatalogRepository::load_sync("/nonexistent/public/videos.json");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_invalid_catalog_is_empty() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ broken").unwrap();

        let catalog = JsonCatalogRepository::load_sync(file.path().to_str().unwrap());

        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_non_array_catalog_is_empty() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"videos": []}"#).unwrap();

        let catalog = JsonCatalogRepository::load_sync(file.path().to_str().unwrap());

        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_keeps_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("public").join("videos.json");
        let path = path.to_str().unwrap();
        let repository = JsonCatalogRepository::new();
        let catalog = vec![json!({
            "id": "session-1",
            "duration": 12.5,
            "overlays": [{"path": "a.webm", "youtubeVideoId": "abc"}]
        })];

        repository.save(path, &catalog).await.unwrap();
        let loaded = repository.load(path).await.unwrap();

        assert_eq!(loaded, catalog);
    }
}
