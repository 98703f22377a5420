//! HeritageFlow - AI-generated heritage slideshows
//!
//! HeritageFlow turns an intangible-cultural-heritage topic into a slide
//! presentation: a remote generative capability produces structured slide
//! text in one round trip, per-slide imagery streams in asynchronously, and
//! a playback controller paginates through the result in the terminal.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use heritageflow::{
//!     DeckConfig, GeminiClient, Orchestrator, PlaybackController, RandomIds, run_tui,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let driver = Arc::new(GeminiClient::new()?);
//!     let orchestrator = Orchestrator::new(driver, Arc::new(RandomIds), DeckConfig::load()?);
//!     let (controller, deck_events) = PlaybackController::new(orchestrator);
//!     run_tui(controller, deck_events).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! HeritageFlow is organized as a workspace with focused crates:
//!
//! - `heritage_core` - Core data types (Presentation, Slide, requests)
//! - `heritage_interface` - HeritageDriver trait definition
//! - `heritage_error` - Error types
//! - `heritage_models` - Gemini driver implementation
//! - `heritage_deck` - Content orchestration and playback state machine
//! - `heritage_tui` - Terminal playback surface
//!
//! This crate (`heritageflow`) re-exports everything for convenience.

// Re-export workspace crates
pub use heritage_core::*;
pub use heritage_deck::*;
pub use heritage_error::*;
pub use heritage_interface::*;
pub use heritage_models::*;
pub use heritage_tui::*;
