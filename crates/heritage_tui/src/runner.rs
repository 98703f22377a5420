//! TUI runner - main loop and terminal lifecycle.
//!
//! The runner owns the terminal and the playback controller, and multiplexes
//! three event sources without blocking: terminal key events (bridged from a
//! reader thread), deck events from spawned generation work, and a redraw
//! tick.

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use heritage_deck::{DeckEvent, PlaybackController, PlaybackState};
use heritage_error::{TuiError, TuiErrorKind, TuiResult};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{Event, EventHandler};

/// What a handled key means for the main loop.
enum Action {
    Continue,
    Quit,
}

/// Run the TUI over a playback controller and its event channel.
pub async fn run_tui(
    mut controller: PlaybackController,
    mut deck_events: UnboundedReceiver<DeckEvent>,
) -> TuiResult<()> {
    // Setup terminal
    enable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to enable raw mode: {}",
            e
        )))
    })?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to setup terminal: {}",
            e
        )))
    })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to create terminal: {}",
            e
        )))
    })?;

    let mut events = EventHandler::new();
    let mut input = String::new();
    let mut tick = tokio::time::interval(Duration::from_millis(250));

    // Main loop
    loop {
        terminal
            .draw(|f| crate::ui::draw(f, &controller, &input))
            .map_err(|e| {
                TuiError::new(TuiErrorKind::Rendering(format!("Failed to draw: {}", e)))
            })?;

        tokio::select! {
            Some(event) = deck_events.recv() => controller.apply(event),
            terminal_event = events.next() => {
                match terminal_event {
                    Some(Event::Key(key)) => {
                        if let Action::Quit = handle_key(&mut controller, &mut input, key) {
                            break;
                        }
                    }
                    Some(Event::Resize) => {}
                    None => {
                        return Err(TuiError::new(TuiErrorKind::EventRead(
                            "Terminal event stream closed".to_string(),
                        )));
                    }
                }
            }
            _ = tick.tick() => {}
        }
    }

    // Cleanup terminal
    disable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to disable raw mode: {}",
            e
        )))
    })?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to cleanup terminal: {}",
            e
        )))
    })?;
    terminal.show_cursor().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to show cursor: {}",
            e
        )))
    })?;

    Ok(())
}

/// Handle a single key event.
///
/// Navigation bindings are active only while presenting; the topic input
/// accepts edits only while idle or after an error.
fn handle_key(controller: &mut PlaybackController, input: &mut String, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match controller.state() {
        PlaybackState::Presenting => {
            match key.code {
                KeyCode::Right | KeyCode::Char('n') | KeyCode::Char(' ') => {
                    controller.next_slide()
                }
                KeyCode::Left | KeyCode::Char('p') => controller.previous_slide(),
                KeyCode::Char(c @ '1'..='9') => {
                    // Dots are 1-based on screen
                    controller.jump_to(c as usize - '1' as usize);
                }
                KeyCode::Char('r') => {
                    if let Some(slide_id) = controller.current_slide().map(|s| s.id().clone()) {
                        controller.refresh_image(&slide_id);
                    }
                }
                KeyCode::Char('f') => controller.toggle_fullscreen(),
                KeyCode::Char('e') => controller.export(),
                KeyCode::Esc | KeyCode::Char('q') => {
                    controller.reset();
                    input.clear();
                }
                _ => {}
            }
            Action::Continue
        }
        PlaybackState::Generating => {
            // Input is disabled while a generation is in flight.
            match key.code {
                KeyCode::Esc => Action::Quit,
                _ => Action::Continue,
            }
        }
        PlaybackState::Idle | PlaybackState::Error => {
            match key.code {
                KeyCode::Enter => controller.submit(input),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                KeyCode::Esc => return Action::Quit,
                _ => {}
            }
            Action::Continue
        }
    }
}
