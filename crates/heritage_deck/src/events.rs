//! Events flowing from spawned work back to the playback controller.

use heritage_core::{Presentation, SlideImage};
use heritage_error::HeritageResult;

/// A completed image generation aimed at one slide of one presentation.
///
/// The `presentation_id` is the identity token for the merge: patches are
/// applied only when it matches the currently owned presentation, so a
/// completion that outlives a reset (or a re-submission) is dropped rather
/// than resurrecting a discarded deck.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePatch {
    /// Id of the presentation the task was spawned for
    pub presentation_id: String,
    /// Id of the slide to merge into
    pub slide_id: String,
    /// The generated image reference
    pub image: SlideImage,
}

/// Completions delivered to [`crate::PlaybackController::apply`].
///
/// Image tasks that resolve to no image send nothing: an absent result is
/// not an event, just a slide that keeps its placeholder.
#[derive(Debug)]
pub enum DeckEvent {
    /// The content call resolved (successfully or not)
    Generated(HeritageResult<Presentation>),
    /// An image task produced a usable image
    ImageReady(ImagePatch),
}
