//! Listen command: run a listening session over stdin transcripts
//!
//! Each input line is a final transcript; lines starting with `~` are
//! interim hypotheses. Ctrl-C or end of input stops the session.

use anyhow::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use robonav::backend::DashboardClient;
use robonav::command::CommandMatcher;
use robonav::config::Config;
use robonav::dispatch::{GoalDispatcher, Outcome};
use robonav::voice::{LineCapture, ListeningSession, SessionEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Listen until interrupted, printing what the session does with each line
pub async fn listen_command(config: &Config) -> Result<()> {
    // Connect timeout plus read timeout of the slowest possible request
    let drain_timeout = Duration::from_secs(config.backend.timeout_secs + 5);
    let client = Arc::new(DashboardClient::from_settings(&config.backend));
    let matcher = CommandMatcher::with_grammar(config.grammar.clone())?;
    let mut session = ListeningSession::new(
        Box::new(LineCapture::stdin()),
        client.clone(),
        GoalDispatcher::new(client),
    )
    .with_matcher(matcher);

    session.start()?;
    println!("Listening (Ctrl-C to stop)...");

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = interrupted.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                interrupted.store(true, Ordering::SeqCst);
            }
        });
    }

    tokio::task::spawn_blocking(move || run_loop(session, &interrupted, drain_timeout)).await?;
    Ok(())
}

fn run_loop(mut session: ListeningSession, interrupted: &AtomicBool, drain_timeout: Duration) {
    while session.is_listening() {
        if interrupted.load(Ordering::SeqCst) {
            session.stop();
            break;
        }
        for event in session.wait_events(POLL_INTERVAL) {
            print_event(&event);
        }
    }
    // End of input leaves goals in flight; report them before exiting
    for event in session.drain_pending(drain_timeout) {
        print_event(&event);
    }
    println!("Stopped.");
}

fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::TranscriptHandled { transcript, rule, intent } => {
            let rule = rule.unwrap_or("none");
            if intent.is_failure() {
                println!("✗ \"{}\" [{}] {}", transcript, rule, intent.describe());
            } else {
                println!("→ \"{}\" [{}] {}", transcript, rule, intent.describe());
            }
        }
        SessionEvent::InterimUpdated(text) => println!("  … {}", text),
        SessionEvent::DispatchCompleted(done) => match &done.outcome {
            Outcome::Ok => println!("✓ {}", done.intent.describe()),
            Outcome::Failed(message) => println!("✗ {}", message),
        },
        SessionEvent::DispatchDiscarded(done) => {
            tracing::debug!("Ignored late outcome {}", done.id);
        }
        SessionEvent::CatalogRefreshed { generation } => {
            tracing::debug!("Catalog refreshed (generation {})", generation);
        }
        SessionEvent::CatalogRefreshFailed { message } => {
            tracing::warn!("Catalog refresh failed: {}", message);
        }
        SessionEvent::CaptureError { message } => println!("✗ {}", message),
        SessionEvent::CaptureClosed => println!("Input closed."),
    }
}
