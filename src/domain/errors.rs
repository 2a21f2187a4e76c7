//! # Upload Errors
//!
//! アップロードエラーの分類（一時的エラー / 致命的エラー）

use thiserror::Error;

/// アップロード中に発生するエラー
///
/// `is_transient()` が `true` のものはリトライ対象、それ以外は即座に呼び出し元へ返す。
#[derive(Debug, Error)]
pub enum UploadError {
    /// リモートサービスがエラーステータスを返した（一時的）
    #[error("remote service returned HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    /// 通信レベルのエラー（一時的）
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// サーバーが受信済みオフセットを進めなかった（一時的）
    #[error("upload stalled at byte offset {offset}")]
    Stalled { offset: u64 },

    /// resumable セッションが無効化された（致命的、ゼロからの再開はしない）
    #[error("upload session is no longer valid (HTTP {status})")]
    SessionInvalid { status: u16 },

    /// アップロード対象の記述が不正（致命的）
    #[error("invalid upload target: {0}")]
    InvalidTarget(String),

    /// リモートの応答がプロトコルに沿っていない（致命的）
    #[error("unexpected response from remote: {0}")]
    Protocol(String),

    /// ローカルのソース読み込み失敗（致命的）
    #[error("failed to read upload source: {0}")]
    Source(#[from] std::io::Error),
}

impl UploadError {
    /// Wrap any transport-level failure.
    pub fn transport<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(error))
    }

    /// リトライで回復し得るエラーかどうか
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Remote { .. } | Self::Transport(_) | Self::Stalled { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(UploadError::Remote {
            status: 503,
            message: "Service Unavailable".to_string()
        }
        .is_transient());
        assert!(UploadError::transport(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset by peer"
        ))
        .is_transient());
        assert!(UploadError::Stalled { offset: 10 }.is_transient());
    }

    #[test]
    fn test_fatal_classification() {
        assert!(!UploadError::SessionInvalid { status: 404 }.is_transient());
        assert!(!UploadError::InvalidTarget("chunk size".to_string()).is_transient());
        assert!(!UploadError::Protocol("missing id".to_string()).is_transient());
        assert!(!UploadError::Source(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "eof"
        ))
        .is_transient());
    }

    #[test]
    fn test_transport_keeps_source() {
        use std::error::Error;

        let inner = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "Broken pipe");
        let error = UploadError::transport(inner);

        let source = error.source().expect("transport error should carry its cause");
        assert_eq!(source.to_string(), "Broken pipe");
        assert_eq!(error.to_string(), "transport error: Broken pipe");
    }

    #[test]
    fn test_remote_display() {
        let error = UploadError::Remote {
            status: 500,
            message: "backendError".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "remote service returned HTTP 500: backendError"
        );
    }
}
