//! Keyword-driven news risk reporter — binary entrypoint.
//! Loads .env and config, decides the run mode once, and exits non-zero on
//! fatal failure so a scheduler observes it.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use news_risk_reporter::app::{self, decide_run_mode};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("news_risk_reporter=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let mode = decide_run_mode(std::env::args().skip(1), |k| std::env::var(k).ok());

    if let Err(e) = app::run(mode).await {
        tracing::error!(error = ?e, "run failed");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
