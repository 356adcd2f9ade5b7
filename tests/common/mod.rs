use payment_confirm::application::poller::PaymentConfirmationPoller;
use payment_confirm::infrastructure::in_memory::{
    InstantClock, RecordingNotifier, ScriptedResponse, ScriptedStatusProvider,
};

pub struct Harness {
    pub poller: PaymentConfirmationPoller,
    pub provider: ScriptedStatusProvider,
    pub notifier: RecordingNotifier,
    pub clock: InstantClock,
}

/// Builds a poller wired to scripted doubles, keeping handles on each
/// double for assertions.
pub fn harness(script: Vec<ScriptedResponse>) -> Harness {
    let provider = ScriptedStatusProvider::new(script);
    let notifier = RecordingNotifier::new();
    let clock = InstantClock::new();
    let poller = PaymentConfirmationPoller::new(
        Box::new(provider.clone()),
        Box::new(notifier.clone()),
        Box::new(clock.clone()),
    );
    Harness {
        poller,
        provider,
        notifier,
        clock,
    }
}
