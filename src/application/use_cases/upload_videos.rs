//! # Upload Videos Use Case
//!
//! 動画ファイル群のアップロードとマニフェスト更新

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use super::drive_upload::{DriveOutcome, ResumableUploadDriver};
use crate::application::dto::upload_config::UploadConfig;
use crate::domain::entities::upload_progress::ProgressSink;
use crate::domain::entities::upload_result::UploadResult;
use crate::domain::entities::upload_target::UploadTarget;
use crate::domain::entities::video_entry::VideoEntry;
use crate::domain::entities::video_metadata::VideoMetadata;
use crate::domain::repositories::manifest_repository::ManifestRepository;
use crate::domain::repositories::media_repository::MediaRepository;
use crate::domain::repositories::upload_endpoint::UploadEndpoint;
use crate::domain::services::retry_policy::Sleeper;

/// ファイル名から拡張子を除いた動画名を取り出す
pub fn video_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// アップロードに失敗したファイル
#[derive(Debug, Clone)]
pub struct FailedUpload {
    pub path: PathBuf,
    pub error: String,
}

/// アップロード結果のサマリー
#[derive(Debug, Clone, Default)]
pub struct UploadSummary {
    /// マニフェストに記録された動画
    pub uploaded: Vec<VideoEntry>,
    /// 失敗したファイル
    pub failed: Vec<FailedUpload>,
    /// 途中でキャンセルされたかどうか
    pub cancelled: bool,
}

/// 動画アップロードユースケース
///
/// ファイルを1つずつアップロードし、成功分をマニフェストに追記する。
/// 1ファイルの失敗はバッチ全体を止めない。
pub struct UploadVideosUseCase<E, S, P, M, R>
where
    E: UploadEndpoint,
    S: Sleeper,
    P: ProgressSink,
    M: MediaRepository,
    R: ManifestRepository,
{
    driver: Arc<ResumableUploadDriver<E, S, P>>,
    media_repository: Arc<M>,
    manifest_repository: Arc<R>,
}

impl<E, S, P, M, R> UploadVideosUseCase<E, S, P, M, R>
where
    E: UploadEndpoint,
    S: Sleeper,
    P: ProgressSink,
    M: MediaRepository,
    R: ManifestRepository,
{
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `driver` - resumable アップロードドライバー
    /// * `media_repository` - メディアリポジトリ
    /// * `manifest_repository` - マニフェストリポジトリ
    pub fn new(
        driver: Arc<ResumableUploadDriver<E, S, P>>,
        media_repository: Arc<M>,
        manifest_repository: Arc<R>,
    ) -> Self {
        Self {
            driver,
            media_repository,
            manifest_repository,
        }
    }

    /// 動画をアップロードしてマニフェストを更新
    ///
    /// # Arguments
    ///
    /// * `paths` - アップロードする動画ファイル（この順に処理）
    /// * `config` - アップロード設定
    /// * `manifest_path` - マニフェストファイルのパス
    /// * `cancel` - キャンセルシグナル
    ///
    /// # Errors
    ///
    /// マニフェストの読み込みまたは保存に失敗した場合にエラーを返す
    pub async fn execute(
        &self,
        paths: &[PathBuf],
        config: &UploadConfig,
        manifest_path: &str,
        cancel: &CancellationToken,
    ) -> Result<UploadSummary> {
        let mut summary = UploadSummary::default();
        if paths.is_empty() {
            return Ok(summary);
        }

        let mut manifest = self.manifest_repository.load(manifest_path).await?;
        let mut next_id = manifest.next_id();

        for (index, path) in paths.iter().enumerate() {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            println!(
                "Uploading {} ({}/{})",
                path.display(),
                index + 1,
                paths.len()
            );

            match self.upload_one(path, config, cancel).await {
                Ok(Some((result, metadata))) => {
                    let entry = VideoEntry::from_upload(
                        next_id,
                        &result,
                        &video_name(path),
                        &metadata.description,
                        &path.to_string_lossy(),
                        Utc::now(),
                    );
                    next_id += 1;

                    println!("✓ Video uploaded successfully. Video ID: {}", entry.video_id);
                    println!("  Video URL: {}", entry.watch_url());
                    summary.uploaded.push(entry);
                }
                Ok(None) => {
                    println!("⚠ Upload of {} cancelled", path.display());
                    summary.cancelled = true;
                    break;
                }
                Err(e) => {
                    warn!("Failed to upload {}: {:#}", path.display(), e);
                    println!("✗ Error uploading {}: {:#}", path.display(), e);
                    summary.failed.push(FailedUpload {
                        path: path.clone(),
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        // 状態を更新して保存
        if !summary.uploaded.is_empty() {
            manifest.add_uploaded(summary.uploaded.clone());
            self.manifest_repository.save(manifest_path, &manifest).await?;
            info!(
                "Recorded {} uploads in {} ({} total)",
                summary.uploaded.len(),
                manifest_path,
                manifest.total_uploaded()
            );
        }

        Ok(summary)
    }

    /// 1ファイルをアップロード（キャンセル時は `None`）
    async fn upload_one(
        &self,
        path: &Path,
        config: &UploadConfig,
        cancel: &CancellationToken,
    ) -> Result<Option<(UploadResult, VideoMetadata)>> {
        let opened = self.media_repository.open(path).await?;
        let metadata = config.metadata_for(&video_name(path));
        let target = UploadTarget::new(
            opened.source,
            opened.size,
            config.chunk_size,
            metadata.clone(),
        )?;

        match self.driver.drive(target, cancel).await? {
            DriveOutcome::Completed(result) => Ok(Some((result, metadata))),
            DriveOutcome::Cancelled { offset } => {
                info!("Cancelled {} at byte {}", path.display(), offset);
                Ok(None)
            }
        }
    }
}
