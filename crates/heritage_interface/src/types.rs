//! Shared types for backend capability reporting.

use serde::{Deserialize, Serialize};

/// Metadata describing a backend model's capabilities and limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Provider name (e.g., "gemini")
    pub provider: &'static str,
    /// Model identifier
    pub model: String,
    /// Maximum tokens accepted as input context
    pub max_input_tokens: usize,
    /// Maximum tokens produced as output
    pub max_output_tokens: usize,
    /// Whether the model honors a response JSON schema
    pub supports_json_mode: bool,
    /// Whether the model can return image outputs
    pub supports_image_output: bool,
}
