//! Content generation error types.
//!
//! These errors are fatal to a single content call: the generated deck is
//! either complete and well-formed or the call fails. They are the only
//! errors surfaced to the user.

/// Content generation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The model response contained no text output to decode
    #[display("Model response contained no text output")]
    NoTextOutput,
    /// The response text did not decode as the expected deck shape
    #[display("Response did not match the expected deck shape: {}", _0)]
    InvalidShape(String),
    /// The decoded deck contained no slides
    #[display("Decoded deck contained no slides")]
    EmptyDeck,
    /// Two slides in the decoded deck share an identifier
    #[display("Duplicate slide id in decoded deck: {}", _0)]
    DuplicateSlideId(String),
    /// The underlying driver call failed
    #[display("Content generation backend failure: {}", _0)]
    Backend(String),
}

/// Content generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use heritage_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::EmptyDeck);
/// assert!(format!("{}", err).contains("no slides"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
