use crate::domain::confirmation::{
    self, ATTEMPT_BUDGET, Conclusion, ConfirmationState, Notice, NoticeKind, Observation,
    RETRY_DELAY, Step,
};
use crate::domain::ports::{ClockBox, NotifierBox, StatusProviderBox};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tracing::warn;

/// Retry policy of the polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: ATTEMPT_BUDGET,
            retry_delay: RETRY_DELAY,
        }
    }
}

/// Mirrors the hosting context being torn down mid-poll.
///
/// Once tripped, the poller publishes no further state, emits no
/// notification, and issues no further request.
#[derive(Debug, Clone, Default)]
pub struct TeardownSwitch(Arc<AtomicBool>);

impl TeardownSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tear_down(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_torn_down(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Drives a payment session to a terminal confirmation state.
///
/// Given a session identifier, `confirm` repeatedly queries the status
/// provider until the payment is reported paid, the session is reported
/// expired, or the attempt budget runs out. Attempts are strictly
/// sequential: the next attempt is scheduled only after the previous one
/// has settled. State transitions are published through a watch channel so
/// views can render progress without participating in the loop.
pub struct PaymentConfirmationPoller {
    provider: StatusProviderBox,
    notifier: NotifierBox,
    clock: ClockBox,
    policy: PollPolicy,
    state: watch::Sender<ConfirmationState>,
    teardown: TeardownSwitch,
}

impl PaymentConfirmationPoller {
    pub fn new(provider: StatusProviderBox, notifier: NotifierBox, clock: ClockBox) -> Self {
        Self::with_policy(provider, notifier, clock, PollPolicy::default())
    }

    pub fn with_policy(
        provider: StatusProviderBox,
        notifier: NotifierBox,
        clock: ClockBox,
        policy: PollPolicy,
    ) -> Self {
        let (state, _) = watch::channel(ConfirmationState::default());
        Self {
            provider,
            notifier,
            clock,
            policy,
            state,
            teardown: TeardownSwitch::new(),
        }
    }

    /// Observe state transitions without participating in the loop.
    pub fn subscribe(&self) -> watch::Receiver<ConfirmationState> {
        self.state.subscribe()
    }

    /// Handle for the hosting context to cut the poller off at unmount.
    pub fn teardown_switch(&self) -> TeardownSwitch {
        self.teardown.clone()
    }

    /// The most recently published state.
    pub fn state(&self) -> ConfirmationState {
        self.state.borrow().clone()
    }

    /// Runs one poll sequence for `session_id` and returns the terminal
    /// state.
    ///
    /// An empty `session_id` fails immediately without touching the
    /// network. Terminal states are absorbing: once one has been reached,
    /// further calls return it without issuing any request.
    pub async fn confirm(&self, session_id: &str) -> ConfirmationState {
        if self.state().is_terminal() {
            return self.state();
        }
        if session_id.is_empty() {
            return self.conclude(Conclusion::missing_session());
        }

        let mut attempt = 0;
        loop {
            if self.teardown.is_torn_down() {
                return self.state();
            }
            attempt += 1;
            self.publish(ConfirmationState::Checking { attempt });

            let observation = match self.provider.fetch(session_id).await {
                Ok(report) => Observation::Report(report),
                Err(e) => {
                    warn!(attempt, error = %e, "payment status check failed");
                    Observation::TransportFailure
                }
            };

            match confirmation::next_step(observation, attempt, self.policy.max_attempts) {
                Step::Conclude(conclusion) => return self.conclude(conclusion),
                Step::Retry => self.clock.sleep(self.policy.retry_delay).await,
            }
        }
    }

    fn conclude(&self, conclusion: Conclusion) -> ConfirmationState {
        if self.teardown.is_torn_down() {
            return self.state();
        }
        self.publish(conclusion.state.clone());
        self.notify(&conclusion.notice);
        conclusion.state
    }

    fn publish(&self, state: ConfirmationState) {
        if self.teardown.is_torn_down() {
            return;
        }
        self.state.send_replace(state);
    }

    fn notify(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Success => self.notifier.success(notice.message),
            NoticeKind::Error => self.notifier.error(notice.message),
        }
    }
}
