//! Terminal playback surface for HeritageFlow.
//!
//! A passive view over the playback controller: a topic prompt while idle,
//! a full-screen presentation once content arrives, and keyboard bindings
//! for navigation. Rendering dispatches on each slide's layout variant;
//! slides whose imagery has not arrived yet show a placeholder image
//! region. Built with ratatui for terminal rendering.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod events;
mod runner;
mod ui;

pub use events::{Event, EventHandler};
pub use heritage_error::{TuiError, TuiErrorKind, TuiResult};
pub use runner::run_tui;
