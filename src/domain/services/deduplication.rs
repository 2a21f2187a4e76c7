//! # Deduplication Service
//!
//! 重複排除サービス

use std::path::PathBuf;

use crate::domain::repositories::manifest_repository::UploadManifest;

/// 重複排除サービス
///
/// マニフェストに記録済みの動画ファイルを除外するビジネスロジック
pub struct DeduplicationService;

impl DeduplicationService {
    /// 重複を除外したパスを返す
    ///
    /// # Arguments
    ///
    /// * `paths` - フィルタリング対象の動画ファイル
    /// * `manifest` - 既存のマニフェスト
    /// * `enabled` - 重複排除が有効かどうか
    ///
    /// # Returns
    ///
    /// (アップロード対象, スキップしたパス)
    pub fn filter_uploaded(
        paths: Vec<PathBuf>,
        manifest: &UploadManifest,
        enabled: bool,
    ) -> (Vec<PathBuf>, Vec<PathBuf>) {
        if !enabled {
            return (paths, Vec::new());
        }

        paths
            .into_iter()
            .partition(|path| !manifest.is_uploaded(&path.to_string_lossy()))
    }
}
