//! # Resumable Upload Driver
//!
//! チャンク単位の resumable アップロードを、有限回リトライ付きで駆動する

use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio_util::sync::CancellationToken;

use crate::domain::entities::upload_progress::{ProgressSink, UploadProgress};
use crate::domain::entities::upload_result::UploadResult;
use crate::domain::entities::upload_session::UploadSession;
use crate::domain::entities::upload_target::UploadTarget;
use crate::domain::entities::video_metadata::VideoMetadata;
use crate::domain::errors::UploadError;
use crate::domain::repositories::media_repository::ChunkSource;
use crate::domain::repositories::upload_endpoint::{ChunkOutcome, UploadEndpoint};
use crate::domain::services::retry_policy::{RetryDecision, RetryPolicy, Sleeper};

/// `drive` の正常終了
#[derive(Debug, Clone, PartialEq)]
pub enum DriveOutcome {
    /// アップロード完了
    Completed(UploadResult),
    /// キャンセルされた。`offset` はその時点の受信確認済みバイト数
    Cancelled { offset: u64 },
}

/// resumable アップロードドライバー
///
/// 1つのチャンクずつ順番に送信し、一時的エラーでは最後に受信確認された
/// オフセットから同じチャンクを再送する。連続失敗がリトライ上限を超えると
/// 最後のエラーをそのまま返す。
pub struct ResumableUploadDriver<E: UploadEndpoint, S: Sleeper, P: ProgressSink> {
    endpoint: Arc<E>,
    sleeper: Arc<S>,
    progress: Arc<P>,
    policy: RetryPolicy,
}

impl<E: UploadEndpoint, S: Sleeper, P: ProgressSink> ResumableUploadDriver<E, S, P> {
    /// 新しいドライバーを作成
    ///
    /// # Arguments
    ///
    /// * `endpoint` - アップロード先エンドポイント
    /// * `sleeper` - バックオフ待機
    /// * `progress` - 進捗の通知先
    /// * `policy` - リトライポリシー
    pub fn new(endpoint: Arc<E>, sleeper: Arc<S>, progress: Arc<P>, policy: RetryPolicy) -> Self {
        Self {
            endpoint,
            sleeper,
            progress,
            policy,
        }
    }

    /// アップロードを最後まで駆動する
    ///
    /// ソースハンドルとセッションはこの関数の中で所有され、
    /// 成功・失敗・キャンセルのいずれでも1回だけ解放される。
    ///
    /// # Errors
    ///
    /// 致命的エラー、またはリトライ上限を超えた一時的エラーをそのまま返す
    pub async fn drive<C: ChunkSource>(
        &self,
        mut target: UploadTarget<C>,
        cancel: &CancellationToken,
    ) -> Result<DriveOutcome, UploadError> {
        let size = target.size();
        self.progress.start(size);

        let handle = match self.open_session(target.metadata(), size, cancel).await? {
            Some(handle) => handle,
            None => {
                info!("Upload cancelled before a session was created");
                return Ok(DriveOutcome::Cancelled { offset: 0 });
            }
        };
        let mut session = UploadSession::new(handle);
        let mut last_reported: Option<u64> = None;

        loop {
            if cancel.is_cancelled() {
                info!("Upload cancelled at byte {}/{}", session.offset(), size);
                return Ok(DriveOutcome::Cancelled {
                    offset: session.offset(),
                });
            }

            let offset = session.offset();
            let len = target.chunk_len_at(offset);
            let chunk = target.source_mut().read_chunk(offset, len).await?;

            debug!(
                "Sending bytes {}-{} of {}",
                offset,
                offset + len as u64,
                size
            );

            let failure = match self
                .endpoint
                .send_chunk(session.handle(), offset, chunk, size)
                .await
            {
                Ok(ChunkOutcome::Completed(result)) => {
                    if last_reported != Some(size) {
                        self.progress.report(UploadProgress::new(size, size));
                    }
                    info!("Upload completed: {}", result.video_id());
                    return Ok(DriveOutcome::Completed(result));
                }
                Ok(ChunkOutcome::Progress { offset: acked }) if acked > size => {
                    return Err(UploadError::Protocol(format!(
                        "acknowledged offset {} exceeds size {}",
                        acked, size
                    )));
                }
                Ok(ChunkOutcome::Progress { offset: acked }) if acked > offset => {
                    session.advance(acked);
                    self.progress.report(UploadProgress::new(acked, size));
                    last_reported = Some(acked);
                    continue;
                }
                Ok(ChunkOutcome::Progress { offset: acked }) => {
                    session.rewind(acked);
                    UploadError::Stalled { offset: acked }
                }
                Err(e) if e.is_transient() => e,
                Err(e) => {
                    error!("Fatal upload error at byte {}: {}", offset, e);
                    return Err(e);
                }
            };

            let retries = session.record_failure();
            self.backoff(failure, retries, cancel).await?;
        }
    }

    /// セッションを作成する（一時的エラーは同じポリシーでリトライ）
    ///
    /// キャンセルされた場合は `None`
    async fn open_session(
        &self,
        metadata: &VideoMetadata,
        size: u64,
        cancel: &CancellationToken,
    ) -> Result<Option<E::Session>, UploadError> {
        let mut retries = 0;

        loop {
            if cancel.is_cancelled() {
                return Ok(None);
            }

            match self.endpoint.create_session(metadata, size).await {
                Ok(session) => return Ok(Some(session)),
                Err(e) if e.is_transient() => {
                    retries += 1;
                    self.backoff(e, retries, cancel).await?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// リトライ判定と待機
    ///
    /// 上限を超えた場合は `error` をそのまま返す。キャンセル済みなら待たずに戻る。
    async fn backoff(
        &self,
        error: UploadError,
        retries: u32,
        cancel: &CancellationToken,
    ) -> Result<(), UploadError> {
        match self.policy.decide(retries) {
            RetryDecision::GiveUp => {
                error!(
                    "Giving up after {} retries: {}",
                    self.policy.max_retries(),
                    error
                );
                Err(error)
            }
            RetryDecision::RetryAfter(delay) => {
                warn!("Transient upload error (retry {}): {}", retries, error);
                println!(
                    "⚠ {} - retrying in {}s (retry {}/{})",
                    error,
                    delay.as_secs(),
                    retries,
                    self.policy.max_retries()
                );

                if cancel.is_cancelled() {
                    return Ok(());
                }

                tokio::select! {
                    _ = self.sleeper.sleep(delay) => {}
                    _ = cancel.cancelled() => {}
                }
                Ok(())
            }
        }
    }
}
