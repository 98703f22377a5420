//! HeritageFlow CLI binary.
//!
//! Launches the terminal playback surface over a Gemini-backed
//! orchestrator.

use clap::Parser;
use std::sync::Arc;

use heritageflow::{DeckConfig, GeminiClient, Orchestrator, PlaybackController, RandomIds, run_tui};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => DeckConfig::from_file(path)?,
        None => DeckConfig::load()?,
    };
    let config = cli.apply_to_config(config);
    tracing::debug!(?config, "Loaded deck configuration");

    let driver = Arc::new(GeminiClient::new_with_retry(
        cli.no_retry,
        cli.max_retries,
        cli.retry_backoff_ms,
    )?);

    let orchestrator = Orchestrator::new(driver, Arc::new(RandomIds), config);
    let (controller, deck_events) = PlaybackController::new(orchestrator);

    run_tui(controller, deck_events).await?;
    Ok(())
}
