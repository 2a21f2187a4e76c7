//! Progress sinks
//!
//! コンソール出力とチャネル転送の2種類

use log::debug;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::entities::upload_progress::{ProgressSink, UploadProgress};

/// Prints `Uploaded N%` whenever the percentage moves within one upload
pub struct ConsoleProgressSink {
    last_percent: AtomicU8,
}

impl ConsoleProgressSink {
    pub fn new() -> Self {
        Self {
            last_percent: AtomicU8::new(u8::MAX),
        }
    }

    /// Returns the line to print, or None when the percentage is unchanged
    fn line_for(&self, progress: UploadProgress) -> Option<String> {
        let percent = progress.percent();
        let previous = self.last_percent.swap(percent, Ordering::Relaxed);
        (previous != percent).then(|| format!("  Uploaded {}%", percent))
    }
}

impl Default for ConsoleProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ConsoleProgressSink {
    fn start(&self, _total_bytes: u64) {
        self.last_percent.store(u8::MAX, Ordering::Relaxed);
    }

    fn report(&self, progress: UploadProgress) {
        debug!(
            "progress: {}/{} bytes",
            progress.bytes_sent, progress.total_bytes
        );
        if let Some(line) = self.line_for(progress) {
            println!("{}", line);
        }
    }
}

/// Forwards progress to a channel. A closed receiver is ignored.
pub struct ChannelProgressSink {
    sender: UnboundedSender<UploadProgress>,
}

impl ChannelProgressSink {
    pub fn new(sender: UnboundedSender<UploadProgress>) -> Self {
        Self { sender }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn report(&self, progress: UploadProgress) {
        let _ = self.sender.send(progress);
    }
}
