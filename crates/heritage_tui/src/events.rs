//! Terminal event bridge.
//!
//! Crossterm's event source is blocking, so a dedicated thread forwards
//! events into a channel the async runner can `select!` on alongside deck
//! events.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;

/// Event types for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal was resized
    Resize,
}

/// Forwards terminal events from a reader thread.
pub struct EventHandler {
    receiver: UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Spawn the reader thread and return the handler.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            loop {
                match event::read() {
                    // Release/repeat events would double every keystroke.
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if sender.send(Event::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(CrosstermEvent::Resize(..)) => {
                        if sender.send(Event::Resize).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        debug!(error = %e, "Terminal event read failed, stopping reader");
                        break;
                    }
                }
            }
        });

        Self { receiver }
    }

    /// Receive the next terminal event.
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
