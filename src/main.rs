use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_confirm::application::poller::PaymentConfirmationPoller;
use payment_confirm::domain::confirmation::ConfirmationState;
use payment_confirm::domain::ports::{ClockBox, NotifierBox, StatusProviderBox};
use payment_confirm::infrastructure::clock::TokioClock;
use payment_confirm::infrastructure::http::HttpStatusProvider;
use payment_confirm::interfaces::console::ConsoleNotifier;
use payment_confirm::interfaces::{query, render};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Payment session id to confirm
    #[arg(long, conflicts_with = "return_url")]
    session_id: Option<String>,

    /// Provider return URL carrying a session_id query parameter
    #[arg(long)]
    return_url: Option<String>,

    /// LMS backend base URL
    #[arg(long, env = "LMS_API_BASE", default_value = "http://localhost:8000")]
    api_base: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let session_id = cli
        .session_id
        .or_else(|| cli.return_url.as_deref().and_then(query::session_id_from_url))
        .unwrap_or_default();

    let provider: StatusProviderBox =
        Box::new(HttpStatusProvider::new(cli.api_base).into_diagnostic()?);
    let notifier: NotifierBox = Box::new(ConsoleNotifier);
    let clock: ClockBox = Box::new(TokioClock);
    let poller = PaymentConfirmationPoller::new(provider, notifier, clock);

    // Render progress from the state channel while the loop runs.
    let mut updates = poller.subscribe();
    let progress = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            if state.is_terminal() {
                break;
            }
            eprintln!("{}", render::render(&state));
        }
    });

    let outcome = poller.confirm(&session_id).await;
    let _ = progress.await;

    println!("{}", render::render(&outcome));

    if outcome == ConfirmationState::Failed {
        std::process::exit(1);
    }
    Ok(())
}
