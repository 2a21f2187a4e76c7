//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::adapter::auth::load_access_token;
use crate::adapter::clock::TokioSleeper;
use crate::adapter::config::Config;
use crate::adapter::progress::ConsoleProgressSink;
use crate::adapter::repositories::file_media_repository::FileMediaRepository;
use crate::adapter::repositories::json_catalog_repository::JsonCatalogRepository;
use crate::adapter::repositories::json_manifest_repository::JsonManifestRepository;
use crate::adapter::youtube::client::YouTubeClient;
use crate::application::use_cases::drive_upload::ResumableUploadDriver;
use crate::application::use_cases::link_catalog::LinkCatalogUseCase;
use crate::application::use_cases::upload_videos::{video_name, UploadSummary, UploadVideosUseCase};
use crate::domain::repositories::manifest_repository::ManifestRepository;
use crate::domain::services::deduplication::DeduplicationService;

use super::cli::Args;

/// What a run is going to do with the given paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadPlan {
    pub pending: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

/// Expand `~` and resolve to an absolute path without `.`/`..` or symlinks
///
/// This is the form recorded as `originalFilePath` and compared for dedup.
pub fn normalize_path(path: &Path) -> io::Result<PathBuf> {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
    std::fs::canonicalize(expanded)
}

/// Ask `Proceed with upload? (y/n)` and read one answer
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, count: usize) -> Result<bool> {
    write!(output, "Upload {} video(s)? (y/n): ", count)?;
    output.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Cancel the token on Ctrl-C
fn cancel_on_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n⚠ Interrupted, stopping after the current chunk...");
            cancel.cancel();
        }
    });
}

/// Video Upload Workflow
pub struct VideoUploadWorkflow {
    config: Config,
    media_repository: Arc<FileMediaRepository>,
    manifest_repository: Arc<JsonManifestRepository>,
    catalog_repository: Arc<JsonCatalogRepository>,
}

impl VideoUploadWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Self {
        Self {
            config,
            media_repository: Arc::new(FileMediaRepository::new()),
            manifest_repository: Arc::new(JsonManifestRepository::new()),
            catalog_repository: Arc::new(JsonCatalogRepository::new()),
        }
    }

    /// Execute the upload workflow
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting YouTube uploader...");
        info!("Dry run: {}", args.dry_run);

        println!("✓ Using configuration:");
        println!("  Manifest: {}", self.config.manifest_path());
        if let Some(catalog_path) = self.config.catalog_path() {
            println!("  Catalog: {}", catalog_path);
        }
        println!(
            "  Chunk size: {} bytes, retries: {} x {}s",
            self.config.chunk_size, self.config.max_retries, self.config.retry_delay_secs
        );
        println!("  Privacy: {}", self.config.privacy_status.as_str());

        let plan = self.plan(args.paths).await?;

        if plan.pending.is_empty() {
            println!("No videos to upload. Exiting.");
            return Ok(());
        }

        if args.dry_run {
            println!("✓ Dry-run mode (not actually uploading)");
            println!("  Would upload {} videos:", plan.pending.len());
            for line in self.dry_run_lines(&plan) {
                println!("{}", line);
            }
            return Ok(());
        }

        if !args.yes {
            let stdin = io::stdin();
            let proceed = confirm(&mut stdin.lock(), &mut io::stdout(), plan.pending.len())?;
            if !proceed {
                println!("Upload cancelled.");
                return Ok(());
            }
        }

        let cancel = CancellationToken::new();
        cancel_on_ctrl_c(cancel.clone());

        let summary = self.upload(&plan.pending, &cancel).await?;
        self.print_summary(&summary);

        if let Some(catalog_path) = self.config.catalog_path() {
            if !summary.uploaded.is_empty() {
                LinkCatalogUseCase::new(self.catalog_repository.clone())
                    .execute(&catalog_path, &summary.uploaded)
                    .await?;
            }
        }

        if !summary.failed.is_empty() {
            bail!(
                "{} of {} uploads failed",
                summary.failed.len(),
                plan.pending.len()
            );
        }

        Ok(())
    }

    /// Split the requested paths into pending, already uploaded and missing
    pub async fn plan(&self, paths: Vec<PathBuf>) -> Result<UploadPlan> {
        let manifest = self
            .manifest_repository
            .load(&self.config.manifest_path())
            .await?;
        println!(
            "✓ Loaded upload manifest: {} videos previously uploaded",
            manifest.total_uploaded()
        );

        let mut existing = Vec::new();
        let mut missing = Vec::new();
        for path in paths {
            match normalize_path(&path) {
                Ok(normalized) if normalized.is_file() => {
                    if !existing.contains(&normalized) {
                        existing.push(normalized);
                    }
                }
                _ => {
                    warn!("File not found: {}", path.display());
                    println!("⚠ Skipping missing file: {}", path.display());
                    missing.push(path);
                }
            }
        }

        let (pending, skipped) = DeduplicationService::filter_uploaded(
            existing,
            &manifest,
            self.config.enable_deduplication,
        );
        for path in &skipped {
            println!("  Already uploaded, skipping: {}", path.display());
        }

        println!("✓ Found {} videos to upload", pending.len());

        Ok(UploadPlan {
            pending,
            skipped,
            missing,
        })
    }

    fn dry_run_lines(&self, plan: &UploadPlan) -> Vec<String> {
        let upload_config = self.config.to_upload_config();
        plan.pending
            .iter()
            .map(|path| {
                let metadata = upload_config.metadata_for(&video_name(path));
                format!("    - {} | Title: {}", path.display(), metadata.title)
            })
            .collect()
    }

    async fn upload(&self, paths: &[PathBuf], cancel: &CancellationToken) -> Result<UploadSummary> {
        let upload_config = self.config.to_upload_config();

        let access_token = load_access_token(&self.config.access_token_env)?;
        let client = YouTubeClient::new(
            &self.config.api_base_url,
            access_token,
            self.config.content_type.clone(),
        )?;
        println!("✓ Created YouTube client");

        let driver = Arc::new(ResumableUploadDriver::new(
            Arc::new(client),
            Arc::new(TokioSleeper),
            Arc::new(ConsoleProgressSink::new()),
            upload_config.retry_policy,
        ));
        let use_case = UploadVideosUseCase::new(
            driver,
            self.media_repository.clone(),
            self.manifest_repository.clone(),
        );

        use_case
            .execute(paths, &upload_config, &self.config.manifest_path(), cancel)
            .await
    }

    fn print_summary(&self, summary: &UploadSummary) {
        println!(
            "✓ Uploaded {} videos ({} failed)",
            summary.uploaded.len(),
            summary.failed.len()
        );
        for failed in &summary.failed {
            println!("  ✗ {}: {}", failed.path.display(), failed.error);
        }
        if summary.cancelled {
            println!("⚠ Upload interrupted; rerun to upload the remaining videos");
        } else {
            println!("✓ Upload complete!");
        }
    }
}
