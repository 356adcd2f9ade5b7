use payment_confirm::domain::confirmation::{
    ConfirmationState, EXHAUSTED_MESSAGE, RETRY_DELAY, VERIFICATION_FAILED_MESSAGE,
};
use payment_confirm::domain::status::StatusReport;
use payment_confirm::infrastructure::in_memory::ScriptedResponse;

mod common;
use common::harness;

#[tokio::test]
async fn test_five_pending_responses_exhaust_the_budget() {
    let h = harness(vec![
        ScriptedResponse::Report(StatusReport::pending());
        5
    ]);

    let outcome = h.poller.confirm("cs_test_1").await;

    assert_eq!(outcome, ConfirmationState::Failed);
    assert_eq!(h.provider.requests(), 5);
    // Four delays separate five attempts; none follows the terminal one.
    assert_eq!(h.clock.sleeps(), vec![RETRY_DELAY; 4]);
    assert_eq!(h.notifier.messages(), vec![EXHAUSTED_MESSAGE.to_owned()]);
}

#[tokio::test]
async fn test_transport_failures_do_not_short_circuit() {
    let h = harness(vec![
        ScriptedResponse::TransportFailure,
        ScriptedResponse::TransportFailure,
        ScriptedResponse::TransportFailure,
        ScriptedResponse::TransportFailure,
        ScriptedResponse::Report(StatusReport::paid(Some("rust-101"))),
    ]);

    let outcome = h.poller.confirm("cs_test_2").await;

    assert_eq!(
        outcome,
        ConfirmationState::Success {
            course_id: Some("rust-101".to_owned())
        }
    );
    assert_eq!(h.provider.requests(), 5);
}

#[tokio::test]
async fn test_transport_exhaustion_uses_generic_message() {
    let h = harness(vec![ScriptedResponse::TransportFailure; 5]);

    let outcome = h.poller.confirm("cs_test_3").await;

    assert_eq!(outcome, ConfirmationState::Failed);
    assert_eq!(h.provider.requests(), 5);
    assert_eq!(
        h.notifier.messages(),
        vec![VERIFICATION_FAILED_MESSAGE.to_owned()]
    );
}

#[tokio::test]
async fn test_final_pending_attempt_selects_support_message() {
    // Transport errors early on, but the budget runs out on a pending
    // report: the support message wins.
    let h = harness(vec![
        ScriptedResponse::TransportFailure,
        ScriptedResponse::TransportFailure,
        ScriptedResponse::TransportFailure,
        ScriptedResponse::TransportFailure,
        ScriptedResponse::Report(StatusReport::pending()),
    ]);

    let outcome = h.poller.confirm("cs_test_4").await;

    assert_eq!(outcome, ConfirmationState::Failed);
    assert_eq!(h.notifier.messages(), vec![EXHAUSTED_MESSAGE.to_owned()]);
}
