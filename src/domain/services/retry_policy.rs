//! # Retry Policy
//!
//! 固定間隔バックオフによる有限回リトライ

use async_trait::async_trait;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// Default number of retries after the first failed attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default fixed delay between attempts (no exponential growth).
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// リトライ判定の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// 指定時間待ってから同じチャンクを再送する
    RetryAfter(Duration),
    /// リトライ上限を超えた
    GiveUp,
}

/// リトライポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 連続失敗回数 `retries`（今回の失敗を含む）に対する判定
    ///
    /// ```
    /// use std::time::Duration;
    /// use tubesync::domain::services::retry_policy::{RetryDecision, RetryPolicy};
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.decide(3), RetryDecision::RetryAfter(Duration::from_secs(5)));
    /// assert_eq!(policy.decide(4), RetryDecision::GiveUp);
    /// ```
    pub fn decide(&self, retries: u32) -> RetryDecision {
        if retries > self.max_retries {
            RetryDecision::GiveUp
        } else {
            RetryDecision::RetryAfter(self.delay)
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_RETRIES,
            Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        )
    }
}

/// バックオフ待機のためのスリープ
///
/// Abstracted so tests do not wait in real time.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
