//! Google Gemini backend.
//!
//! Split into the REST client and the wire-protocol module. The protocol
//! types are hand-written serde structures matching the API's camelCase
//! JSON, so the client can use request features (response schemas, image
//! output) without an SDK in the way.

mod client;
pub mod protocol;

pub use client::GeminiClient;

use heritage_error::GeminiError;

/// Result type for Gemini-specific operations.
pub type GeminiResult<T> = Result<T, GeminiError>;
