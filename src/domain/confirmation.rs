use super::status::StatusReport;
use std::time::Duration;

/// Maximum number of status queries before giving up on a session.
pub const ATTEMPT_BUDGET: u32 = 5;

/// Fixed delay between consecutive status queries.
pub const RETRY_DELAY: Duration = Duration::from_millis(2000);

pub const NO_SESSION_MESSAGE: &str = "No payment session found";
pub const ENROLLED_MESSAGE: &str = "Payment successful! You are now enrolled in the course.";
pub const EXPIRED_MESSAGE: &str = "Payment session expired";
pub const EXHAUSTED_MESSAGE: &str = "Unable to verify payment. Please contact support.";
pub const VERIFICATION_FAILED_MESSAGE: &str = "Payment verification failed";

/// Rendering state of the confirmation flow.
///
/// `Checking` is the initial state. `Success` and `Failed` are terminal and
/// absorbing: no transition leaves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationState {
    Checking { attempt: u32 },
    Success { course_id: Option<String> },
    Failed,
}

impl ConfirmationState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ConfirmationState::Checking { .. })
    }
}

impl Default for ConfirmationState {
    fn default() -> Self {
        ConfirmationState::Checking { attempt: 0 }
    }
}

/// What one poll attempt observed: a parsed status report, or a
/// transport-level failure (rejected request, non-2xx, malformed body).
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    Report(StatusReport),
    TransportFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A single toast-style message for the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
}

impl Notice {
    pub fn success(message: &'static str) -> Self {
        Self {
            kind: NoticeKind::Success,
            message,
        }
    }

    pub fn error(message: &'static str) -> Self {
        Self {
            kind: NoticeKind::Error,
            message,
        }
    }
}

/// A terminal transition together with its notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Conclusion {
    pub state: ConfirmationState,
    pub notice: Notice,
}

impl Conclusion {
    /// The immediate failure taken when no session identifier is present.
    pub fn missing_session() -> Self {
        Self {
            state: ConfirmationState::Failed,
            notice: Notice::error(NO_SESSION_MESSAGE),
        }
    }
}

/// Outcome of classifying one attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Stay in `Checking` and schedule another attempt.
    Retry,
    /// Transition to a terminal state and emit the notice.
    Conclude(Conclusion),
}

/// Pure transition function of the polling state machine.
///
/// `attempt` is the 1-based number of the request that produced
/// `observation`; `budget` is the attempt budget. A paid report wins over an
/// expired one. Transport failures share the retry path with pending
/// reports; the kind of the final attempt selects the exhaustion message.
pub fn next_step(observation: Observation, attempt: u32, budget: u32) -> Step {
    match observation {
        Observation::Report(report) if report.is_paid() => Step::Conclude(Conclusion {
            state: ConfirmationState::Success {
                course_id: report.course_id(),
            },
            notice: Notice::success(ENROLLED_MESSAGE),
        }),
        Observation::Report(report) if report.is_expired() => Step::Conclude(Conclusion {
            state: ConfirmationState::Failed,
            notice: Notice::error(EXPIRED_MESSAGE),
        }),
        Observation::Report(_) if attempt >= budget => Step::Conclude(Conclusion {
            state: ConfirmationState::Failed,
            notice: Notice::error(EXHAUSTED_MESSAGE),
        }),
        Observation::Report(_) => Step::Retry,
        Observation::TransportFailure if attempt >= budget => Step::Conclude(Conclusion {
            state: ConfirmationState::Failed,
            notice: Notice::error(VERIFICATION_FAILED_MESSAGE),
        }),
        Observation::TransportFailure => Step::Retry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paid_concludes_success_with_course_id() {
        let step = next_step(
            Observation::Report(StatusReport::paid(Some("rust-101"))),
            1,
            ATTEMPT_BUDGET,
        );
        match step {
            Step::Conclude(conclusion) => {
                assert_eq!(
                    conclusion.state,
                    ConfirmationState::Success {
                        course_id: Some("rust-101".to_owned())
                    }
                );
                assert_eq!(conclusion.notice, Notice::success(ENROLLED_MESSAGE));
            }
            Step::Retry => panic!("paid report must conclude"),
        }
    }

    #[test]
    fn test_paid_without_metadata_still_succeeds() {
        let step = next_step(Observation::Report(StatusReport::paid(None)), 3, ATTEMPT_BUDGET);
        assert_eq!(
            step,
            Step::Conclude(Conclusion {
                state: ConfirmationState::Success { course_id: None },
                notice: Notice::success(ENROLLED_MESSAGE),
            })
        );
    }

    #[test]
    fn test_expired_concludes_failed_with_expired_message() {
        let step = next_step(Observation::Report(StatusReport::expired()), 2, ATTEMPT_BUDGET);
        assert_eq!(
            step,
            Step::Conclude(Conclusion {
                state: ConfirmationState::Failed,
                notice: Notice::error(EXPIRED_MESSAGE),
            })
        );
    }

    #[test]
    fn test_paid_wins_over_expired() {
        let mut report = StatusReport::paid(Some("rust-101"));
        report.status = "expired".to_owned();
        let step = next_step(Observation::Report(report), 1, ATTEMPT_BUDGET);
        assert!(matches!(
            step,
            Step::Conclude(Conclusion {
                state: ConfirmationState::Success { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_pending_within_budget_retries() {
        for attempt in 1..ATTEMPT_BUDGET {
            let step = next_step(
                Observation::Report(StatusReport::pending()),
                attempt,
                ATTEMPT_BUDGET,
            );
            assert_eq!(step, Step::Retry);
        }
    }

    #[test]
    fn test_pending_at_budget_exhausts() {
        let step = next_step(
            Observation::Report(StatusReport::pending()),
            ATTEMPT_BUDGET,
            ATTEMPT_BUDGET,
        );
        assert_eq!(
            step,
            Step::Conclude(Conclusion {
                state: ConfirmationState::Failed,
                notice: Notice::error(EXHAUSTED_MESSAGE),
            })
        );
    }

    #[test]
    fn test_transport_failure_within_budget_retries() {
        let step = next_step(Observation::TransportFailure, 4, ATTEMPT_BUDGET);
        assert_eq!(step, Step::Retry);
    }

    #[test]
    fn test_transport_failure_at_budget_reports_generic_message() {
        let step = next_step(Observation::TransportFailure, ATTEMPT_BUDGET, ATTEMPT_BUDGET);
        assert_eq!(
            step,
            Step::Conclude(Conclusion {
                state: ConfirmationState::Failed,
                notice: Notice::error(VERIFICATION_FAILED_MESSAGE),
            })
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(ConfirmationState::Success { course_id: None }.is_terminal());
        assert!(ConfirmationState::Failed.is_terminal());
        assert!(!ConfirmationState::Checking { attempt: 5 }.is_terminal());
    }
}
