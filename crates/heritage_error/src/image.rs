//! Image generation error types.
//!
//! Image calls are best-effort: every kind here is recovered at the
//! orchestrator boundary and resolved to an absent image, never surfaced
//! to the user.

/// Image generation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ImageErrorKind {
    /// The response contained no usable image part
    #[display("Model response contained no image part")]
    NoImagePart,
    /// The inline image payload failed to decode
    #[display("Image payload decode error: {}", _0)]
    PayloadDecode(String),
    /// The underlying driver call failed
    #[display("Image generation backend failure: {}", _0)]
    Backend(String),
}

/// Image generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use heritage_error::{ImageError, ImageErrorKind};
///
/// let err = ImageError::new(ImageErrorKind::NoImagePart);
/// assert!(format!("{}", err).contains("no image part"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Image Error: {} at line {} in {}", kind, line, file)]
pub struct ImageError {
    /// The kind of error that occurred
    pub kind: ImageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ImageError {
    /// Create a new ImageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ImageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
