//! Tokio-backed sleeper used between retries

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::services::retry_policy::Sleeper;

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
