use crate::domain::confirmation::NoticeKind;
use crate::domain::ports::{Clock, Notifier, StatusProvider};
use crate::domain::status::StatusReport;
use crate::error::{ConfirmationError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

/// One scripted answer from a `ScriptedStatusProvider`.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    Report(StatusReport),
    TransportFailure,
}

/// A `StatusProvider` that replays a fixed response sequence.
///
/// Counts every request it receives. Once the script is exhausted it keeps
/// answering with pending reports.
#[derive(Default, Clone)]
pub struct ScriptedStatusProvider {
    script: Arc<RwLock<VecDeque<ScriptedResponse>>>,
    requests: Arc<AtomicU32>,
}

impl ScriptedStatusProvider {
    pub fn new(script: impl IntoIterator<Item = ScriptedResponse>) -> Self {
        Self {
            script: Arc::new(RwLock::new(script.into_iter().collect())),
            requests: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Number of requests issued so far.
    pub fn requests(&self) -> u32 {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusProvider for ScriptedStatusProvider {
    async fn fetch(&self, _session_id: &str) -> Result<StatusReport> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let next = self.script.write().await.pop_front();
        match next {
            Some(ScriptedResponse::Report(report)) => Ok(report),
            Some(ScriptedResponse::TransportFailure) => Err(ConfirmationError::BadStatus(503)),
            None => Ok(StatusReport::pending()),
        }
    }
}

/// A `Clock` that returns immediately, recording each requested sleep.
///
/// An optional hook runs on every sleep; tests use it to trip a teardown
/// switch at a deterministic point in the loop.
#[derive(Default, Clone)]
pub struct InstantClock {
    sleeps: Arc<Mutex<Vec<Duration>>>,
    on_sleep: Arc<Mutex<Option<Box<dyn Fn() + Send + Sync>>>>,
}

impl InstantClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a hook that runs on every subsequent sleep. Clones share
    /// the hook.
    pub fn set_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.on_sleep.lock().unwrap() = Some(Box::new(hook));
    }

    /// Durations requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for InstantClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        if let Some(hook) = self.on_sleep.lock().unwrap().as_ref() {
            hook();
        }
    }
}

/// A `Notifier` that captures every notification for assertions.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<(NoticeKind, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.notices.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .map(|(_, message)| message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((NoticeKind::Success, message.to_owned()));
    }

    fn error(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((NoticeKind::Error, message.to_owned()));
    }
}
