//! Command-line interface for HeritageFlow.
//!
//! The binary launches the terminal playback surface; flags select the
//! configuration file and override models and retry behavior.

use clap::Parser;
use heritage_deck::DeckConfig;
use std::path::PathBuf;

/// AI-generated slideshow presentations for intangible cultural heritage topics.
#[derive(Debug, Parser)]
#[command(name = "heritageflow", version, about)]
pub struct Cli {
    /// Path to a configuration file (defaults to bundled + ./heritageflow.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the content generation model
    #[arg(long)]
    pub content_model: Option<String>,

    /// Override the image generation model
    #[arg(long)]
    pub image_model: Option<String>,

    /// Disable automatic retry of transient API errors
    #[arg(long)]
    pub no_retry: bool,

    /// Maximum retry attempts override
    #[arg(long)]
    pub max_retries: Option<usize>,

    /// Initial retry backoff delay override, in milliseconds
    #[arg(long)]
    pub retry_backoff_ms: Option<u64>,
}

impl Cli {
    /// Apply CLI overrides to a loaded deck configuration.
    pub fn apply_to_config(&self, mut config: DeckConfig) -> DeckConfig {
        if let Some(model) = &self.content_model {
            config.content_model = model.clone();
        }
        if let Some(model) = &self.image_model {
            config.image_model = model.clone();
        }
        config
    }
}
