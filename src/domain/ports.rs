use super::status::StatusReport;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Queries the backend for the current state of a payment session.
#[async_trait]
pub trait StatusProvider: Send + Sync {
    async fn fetch(&self, session_id: &str) -> Result<StatusReport>;
}

/// Sleeps between attempts. Injected so the loop runs without real timers
/// under test.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Transient user-facing message channel.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

pub type StatusProviderBox = Box<dyn StatusProvider>;
pub type ClockBox = Box<dyn Clock>;
pub type NotifierBox = Box<dyn Notifier>;
