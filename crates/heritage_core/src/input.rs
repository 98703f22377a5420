//! Input types for generative requests.

use serde::{Deserialize, Serialize};

/// Supported input types for the generative capability.
///
/// # Examples
///
/// ```
/// use heritage_core::Input;
///
/// // Text input
/// let text = Input::Text("Describe paper cutting".to_string());
///
/// // Image input with raw bytes
/// let image = Input::Image {
///     mime: Some("image/png".to_string()),
///     data: vec![0x89, 0x50, 0x4E, 0x47],
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),

    /// Image input (PNG, JPEG, WebP, etc.), carried as raw bytes.
    Image {
        /// MIME type, e.g., "image/png" or "image/jpeg"
        mime: Option<String>,
        /// Raw image bytes
        data: Vec<u8>,
    },
}
