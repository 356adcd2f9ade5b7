use crate::domain::ports::Clock;
use async_trait::async_trait;
use std::time::Duration;

/// Real-time `Clock` backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
