//! Content orchestration and playback core for HeritageFlow.
//!
//! Two cooperating components live here:
//!
//! - [`Orchestrator`] obtains a structured [`heritage_core::Presentation`]
//!   from the injected generative driver, then back-fills one image per
//!   slide through independently spawned tasks.
//! - [`PlaybackController`] owns the in-memory presentation, the current
//!   slide index, and the `Idle → Generating → Presenting / Error` state
//!   machine. Spawned work reports through a [`DeckEvent`] channel that the
//!   host loop feeds back into [`PlaybackController::apply`], so every
//!   mutation happens on one thread in reaction to discrete events.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod controller;
mod events;
mod extraction;
mod orchestrator;

pub use config::DeckConfig;
pub use controller::{PlaybackController, PlaybackState};
pub use events::{DeckEvent, ImagePatch};
pub use extraction::extract_json;
pub use orchestrator::Orchestrator;
