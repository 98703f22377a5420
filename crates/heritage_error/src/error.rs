//! Top-level error wrapper types.

use crate::{
    BackendError, ConfigError, GeminiError, GenerationError, HttpError, ImageError, JsonError,
};
#[cfg(feature = "tui")]
use crate::TuiError;

/// This is the foundation error enum for the HeritageFlow workspace.
///
/// # Examples
///
/// ```
/// use heritage_error::{HeritageError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: HeritageError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HeritageErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Gemini driver error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Content generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Image generation error
    #[from(ImageError)]
    Image(ImageError),
    /// TUI error
    #[cfg(feature = "tui")]
    #[from(TuiError)]
    Tui(TuiError),
}

/// HeritageFlow error with kind discrimination.
///
/// # Examples
///
/// ```
/// use heritage_error::{HeritageResult, ConfigError};
///
/// fn might_fail() -> HeritageResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Heritage Error: {}", _0)]
pub struct HeritageError(Box<HeritageErrorKind>);

impl HeritageError {
    /// Create a new error from a kind.
    pub fn new(kind: HeritageErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HeritageErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to HeritageErrorKind
impl<T> From<T> for HeritageError
where
    T: Into<HeritageErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for HeritageFlow operations.
///
/// # Examples
///
/// ```
/// use heritage_error::{HeritageResult, HttpError};
///
/// fn fetch_data() -> HeritageResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type HeritageResult<T> = std::result::Result<T, HeritageError>;
