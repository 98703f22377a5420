//! Wire types for the Gemini `generateContent` REST endpoint.
//!
//! This module defines the JSON structures exchanged with the API and the
//! conversions to and from the crate's request/response types.
//!
//! # Protocol Overview
//!
//! 1. Client POSTs a `GenerateContentRequest` to
//!    `models/{model}:generateContent`
//! 2. Server responds with a `GenerateContentResponse` carrying candidates
//! 3. Candidate parts are either text or `inlineData` (base64 payload plus
//!    media type); inline data is how generated imagery comes back
//!
//! Error responses carry a JSON body with an `error.message` field, decoded
//! by [`decode_error_message`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use heritage_core::{GenerateRequest, GenerateResponse, Input, Output, Role};
use heritage_error::{GeminiError, GeminiErrorKind};
use serde::{Deserialize, Serialize};

use super::GeminiResult;

//
// ─── REQUEST ────────────────────────────────────────────────────────────────
//

/// Top-level request body for `generateContent`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns in order
    pub contents: Vec<Content>,

    /// System instruction for the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,

    /// Generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// System instruction wrapper (role-less content).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInstruction {
    /// Instruction parts
    pub parts: Vec<Part>,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// "user" or "model"; omitted for system instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Parts making up the turn
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A single content part: text or inline binary data.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Inline binary payload (base64)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
}

impl Part {
    /// Text-only part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

/// Base64-encoded binary payload with its media type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// Media type, e.g. "image/png"
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

/// Generation configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,

    /// Response MIME type ("application/json" enables JSON mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,

    /// JSON schema constraining the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,

    /// Requested response modalities (e.g. ["TEXT", "IMAGE"])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,

    /// Image output configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

/// Image output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// Requested aspect ratio, e.g. "16:9"
    pub aspect_ratio: String,
}

//
// ─── RESPONSE ───────────────────────────────────────────────────────────────
//

/// Top-level response body from `generateContent`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated candidates (usually one)
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content
    #[serde(default)]
    pub content: Option<Content>,

    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Error body shape for non-success responses.
#[derive(Debug, Clone, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

/// Error detail within an error body.
#[derive(Debug, Clone, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

//
// ─── CONVERSIONS ────────────────────────────────────────────────────────────
//

/// Encode a generic request into the wire shape.
///
/// System messages collapse into the `systemInstruction` field; user and
/// assistant messages become "user" and "model" turns. A response schema
/// switches on JSON mode; image parameters request the IMAGE modality with
/// the configured aspect ratio.
pub fn encode_request(req: &GenerateRequest) -> GenerateContentRequest {
    let mut contents = Vec::new();
    let mut system_parts = Vec::new();

    for msg in &req.messages {
        let parts: Vec<Part> = msg.content.iter().map(encode_input).collect();
        match msg.role {
            Role::System => system_parts.extend(parts),
            Role::User => contents.push(Content {
                role: Some("user".to_string()),
                parts,
            }),
            Role::Assistant => contents.push(Content {
                role: Some("model".to_string()),
                parts,
            }),
        }
    }

    let mut config = GenerationConfig {
        temperature: req.temperature,
        max_output_tokens: req.max_tokens.map(|t| t as i32),
        ..Default::default()
    };

    if let Some(schema) = &req.response_schema {
        config.response_mime_type = Some("application/json".to_string());
        config.response_schema = Some(schema.clone());
    }

    if let Some(image) = &req.image_output {
        config.response_modalities = Some(vec!["TEXT".to_string(), "IMAGE".to_string()]);
        config.image_config = Some(ImageConfig {
            aspect_ratio: image.aspect_ratio.clone(),
        });
    }

    let has_config = config.temperature.is_some()
        || config.max_output_tokens.is_some()
        || config.response_mime_type.is_some()
        || config.response_modalities.is_some();

    GenerateContentRequest {
        contents,
        system_instruction: if system_parts.is_empty() {
            None
        } else {
            Some(SystemInstruction {
                parts: system_parts,
            })
        },
        generation_config: has_config.then_some(config),
    }
}

fn encode_input(input: &Input) -> Part {
    match input {
        Input::Text(text) => Part::text(text.clone()),
        Input::Image { mime, data } => Part {
            text: None,
            inline_data: Some(Blob {
                mime_type: mime.clone().unwrap_or_else(|| "image/png".to_string()),
                data: STANDARD.encode(data),
            }),
        },
    }
}

/// Decode a wire response into generic outputs.
///
/// Walks the first candidate's parts: text parts become text outputs,
/// inline data decodes into image outputs. A response with no candidate
/// or no parts is an error; the caller decides whether that is fatal.
pub fn decode_response(response: GenerateContentResponse) -> GeminiResult<GenerateResponse> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GeminiError::new(GeminiErrorKind::EmptyResponse))?;

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();

    let mut outputs = Vec::new();
    for part in parts {
        if let Some(text) = part.text {
            outputs.push(Output::Text(text));
        }
        if let Some(blob) = part.inline_data {
            let data = STANDARD
                .decode(&blob.data)
                .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;
            outputs.push(Output::Image {
                mime: Some(blob.mime_type),
                data,
            });
        }
    }

    if outputs.is_empty() {
        return Err(GeminiError::new(GeminiErrorKind::EmptyResponse));
    }

    Ok(GenerateResponse { outputs })
}

/// Extract the human-readable message from an API error body, if it parses.
pub fn decode_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
}
