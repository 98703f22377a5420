//! Playback state machine: deck ownership, navigation, and image merging.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use heritage_core::{Presentation, Slide};

use crate::{DeckEvent, ImagePatch, Orchestrator};

/// User-facing message stored when the content call fails.
const GENERATION_FAILED: &str = "Failed to generate presentation. Please try again later.";

/// Playback controller states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlaybackState {
    /// No presentation, awaiting topic input
    Idle,
    /// Content request in flight
    Generating,
    /// Presentation available and navigable
    Presenting,
    /// Generation failed, topic input re-enabled
    Error,
}

/// Owns the presentation and drives playback.
///
/// The controller is single-threaded: operations mutate state directly,
/// and spawned work (content call, image tasks) reports back through the
/// [`DeckEvent`] channel returned by [`PlaybackController::new`]. The host
/// loop receives from that channel and hands each event to
/// [`PlaybackController::apply`], which serializes image merges with
/// resets and re-submissions.
pub struct PlaybackController {
    orchestrator: Orchestrator,
    state: PlaybackState,
    presentation: Option<Presentation>,
    current_index: usize,
    topic: String,
    error: Option<String>,
    fullscreen: bool,
    status_message: String,
    events: UnboundedSender<DeckEvent>,
}

impl PlaybackController {
    /// Create a controller and the event receiver the host loop must pump.
    pub fn new(orchestrator: Orchestrator) -> (Self, UnboundedReceiver<DeckEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let controller = Self {
            orchestrator,
            state: PlaybackState::Idle,
            presentation: None,
            current_index: 0,
            topic: String::new(),
            error: None,
            fullscreen: false,
            status_message: String::new(),
            events,
        };
        (controller, receiver)
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The owned presentation, if any.
    pub fn presentation(&self) -> Option<&Presentation> {
        self.presentation.as_ref()
    }

    /// Current slide index.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The slide at the current index.
    pub fn current_slide(&self) -> Option<&Slide> {
        self.presentation
            .as_ref()
            .and_then(|p| p.slides().get(self.current_index))
    }

    /// Number of slides in the owned presentation (0 when idle).
    pub fn slide_count(&self) -> usize {
        self.presentation
            .as_ref()
            .map(Presentation::slide_count)
            .unwrap_or(0)
    }

    /// The submitted topic.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// User-facing generation error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the view is fullscreen.
    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Transient status note for the view.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Submit a topic for generation.
    ///
    /// No-op if the topic trims to empty or a generation is already in
    /// flight (or a deck is currently presenting). Transitions
    /// `Idle | Error → Generating` and spawns the content call; the result
    /// arrives as [`DeckEvent::Generated`].
    pub fn submit(&mut self, topic: &str) {
        let topic = topic.trim();
        if topic.is_empty() {
            return;
        }
        if matches!(
            self.state,
            PlaybackState::Generating | PlaybackState::Presenting
        ) {
            debug!(state = ?self.state, "Ignoring submit");
            return;
        }

        self.topic = topic.to_string();
        self.error = None;
        self.status_message.clear();
        self.state = PlaybackState::Generating;

        info!(topic = %self.topic, "Submitting generation request");

        let orchestrator = self.orchestrator.clone();
        let events = self.events.clone();
        let topic = self.topic.clone();
        tokio::spawn(async move {
            let result = orchestrator.generate_content(&topic).await;
            let _ = events.send(DeckEvent::Generated(result));
        });
    }

    /// Apply a completion event from spawned work.
    pub fn apply(&mut self, event: DeckEvent) {
        match event {
            DeckEvent::Generated(result) => self.apply_generated(result),
            DeckEvent::ImageReady(patch) => self.apply_patch(patch),
        }
    }

    fn apply_generated(&mut self, result: heritage_error::HeritageResult<Presentation>) {
        // A reset while the call was in flight returns to Idle; the late
        // completion is stale and must not resurrect the request.
        if self.state != PlaybackState::Generating {
            debug!(state = ?self.state, "Dropping stale generation result");
            return;
        }

        match result {
            Ok(presentation) => {
                info!(
                    presentation_id = %presentation.id(),
                    slide_count = presentation.slide_count(),
                    "Entering presentation"
                );
                self.orchestrator.spawn_backfill(&presentation, &self.events);
                self.presentation = Some(presentation);
                self.current_index = 0;
                self.state = PlaybackState::Presenting;
            }
            Err(e) => {
                warn!(error = %e, "Content generation failed");
                self.error = Some(GENERATION_FAILED.to_string());
                self.state = PlaybackState::Error;
            }
        }
    }

    fn apply_patch(&mut self, patch: ImagePatch) {
        let Some(presentation) = self.presentation.as_mut() else {
            debug!(slide_id = %patch.slide_id, "Dropping image patch with no owned presentation");
            return;
        };

        if presentation.id() != &patch.presentation_id {
            debug!(
                patch_presentation = %patch.presentation_id,
                owned_presentation = %presentation.id(),
                "Dropping stale image patch"
            );
            return;
        }

        if presentation.merge_image(&patch.slide_id, patch.image) {
            debug!(slide_id = %patch.slide_id, "Merged slide image");
        }
    }

    /// Advance to the next slide; no-op at the last slide.
    pub fn next_slide(&mut self) {
        if self.current_index < self.slide_count().saturating_sub(1) {
            self.current_index += 1;
        }
    }

    /// Retreat to the previous slide; no-op at the first slide.
    pub fn previous_slide(&mut self) {
        if self.presentation.is_some() && self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// Jump directly to a slide index; out-of-range requests are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if index < self.slide_count() {
            self.current_index = index;
        }
    }

    /// Re-generate the image for one slide.
    ///
    /// No-op without a presentation or for an unknown slide id. The
    /// completion arrives as an ordinary [`DeckEvent::ImageReady`] patch;
    /// a failed call sends nothing, leaving any existing image untouched.
    pub fn refresh_image(&self, slide_id: &str) {
        let Some(presentation) = self.presentation.as_ref() else {
            return;
        };
        let Some(slide) = presentation.slide(slide_id) else {
            debug!(slide_id, "Ignoring refresh for unknown slide");
            return;
        };

        self.orchestrator.spawn_image_task(
            presentation.id().clone(),
            slide.id().clone(),
            slide.title().clone(),
            presentation.topic().clone(),
            self.events.clone(),
        );
    }

    /// Discard the presentation and return to the idle input state.
    ///
    /// In-flight image tasks are not cancelled; their patches fail the
    /// identity check in [`PlaybackController::apply`] and are dropped.
    pub fn reset(&mut self) {
        info!("Resetting playback");
        self.presentation = None;
        self.current_index = 0;
        self.topic.clear();
        self.error = None;
        self.fullscreen = false;
        self.status_message.clear();
        self.state = PlaybackState::Idle;
    }

    /// Toggle the fullscreen flag.
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// Export affordance: declared, intentionally not implemented.
    pub fn export(&mut self) {
        self.status_message = "Export is not available yet.".to_string();
    }
}
