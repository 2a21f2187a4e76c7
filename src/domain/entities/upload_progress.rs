//! # Upload Progress
//!
//! 進捗通知と通知先（ProgressSink）

#[cfg(test)]
use mockall::automock;

/// アップロード進捗
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// 送信済み（受信確認済み）バイト数
    pub bytes_sent: u64,
    /// 総バイト数
    pub total_bytes: u64,
}

impl UploadProgress {
    pub fn new(bytes_sent: u64, total_bytes: u64) -> Self {
        Self {
            bytes_sent,
            total_bytes,
        }
    }

    /// 完了率（0-100）。空ファイルは常に100
    pub fn percent(&self) -> u8 {
        if self.total_bytes == 0 {
            return 100;
        }
        let percent = self.bytes_sent.min(self.total_bytes) * 100 / self.total_bytes;
        percent as u8
    }

    pub fn is_complete(&self) -> bool {
        self.bytes_sent >= self.total_bytes
    }
}

/// 進捗の通知先
///
/// Best-effort. Implementations must not fail the upload.
#[cfg_attr(test, automock)]
pub trait ProgressSink: Send + Sync {
    /// Called once at the start of each upload, before its first report
    fn start(&self, _total_bytes: u64) {}

    fn report(&self, progress: UploadProgress);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(UploadProgress::new(0, 200).percent(), 0);
        assert_eq!(UploadProgress::new(50, 200).percent(), 25);
        assert_eq!(UploadProgress::new(199, 200).percent(), 99);
        assert_eq!(UploadProgress::new(200, 200).percent(), 100);
    }

    #[test]
    fn test_percent_zero_byte_file() {
        let progress = UploadProgress::new(0, 0);
        assert_eq!(progress.percent(), 100);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_is_complete() {
        assert!(!UploadProgress::new(10, 20).is_complete());
        assert!(UploadProgress::new(20, 20).is_complete());
    }

    #[test]
    fn test_mock_sink_receives_report() {
        let mut sink = MockProgressSink::new();
        sink.expect_report()
            .withf(|p| p.percent() == 50)
            .times(1)
            .return_const(());

        sink.report(UploadProgress::new(5, 10));
    }

    #[test]
    fn test_mock_sink_receives_start() {
        let mut sink = MockProgressSink::new();
        sink.expect_start().with(mockall::predicate::eq(10)).times(1).return_const(());

        sink.start(10);
    }
}
