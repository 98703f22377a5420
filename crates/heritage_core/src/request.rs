//! Request and response types for generative calls.

use crate::{Message, Output};
use serde::{Deserialize, Serialize};

/// Image output parameters for requests that ask the model to produce imagery.
///
/// # Examples
///
/// ```
/// use heritage_core::ImageParams;
///
/// let params = ImageParams::widescreen();
/// assert_eq!(params.aspect_ratio, "16:9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageParams {
    /// Requested aspect ratio, e.g. "16:9"
    pub aspect_ratio: String,
}

impl ImageParams {
    /// The fixed 16:9 ratio used for slide imagery.
    pub fn widescreen() -> Self {
        Self {
            aspect_ratio: "16:9".to_string(),
        }
    }
}

/// Generic generation request (multimodal-safe).
///
/// # Examples
///
/// ```
/// use heritage_core::{GenerateRequest, Message, Role};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::text(Role::User, "Hello!")])
///     .model(Some("gemini-2.5-flash".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier to use
    pub model: Option<String>,
    /// JSON schema constraining the response shape (enables JSON mode)
    pub response_schema: Option<serde_json::Value>,
    /// Image output parameters (requests an image response modality)
    pub image_output: Option<ImageParams>,
}

impl GenerateRequest {
    /// Start building a request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use heritage_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("A deck of slides".to_string())],
/// };
///
/// assert_eq!(response.outputs.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// First text output, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.outputs.iter().find_map(Output::as_text)
    }

    /// First image output, if any, as `(mime, data)`.
    pub fn first_image(&self) -> Option<(Option<&str>, &[u8])> {
        self.outputs.iter().find_map(|output| match output {
            Output::Image { mime, data } => Some((mime.as_deref(), data.as_slice())),
            _ => None,
        })
    }
}
