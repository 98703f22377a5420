//! Backend drivers for the HeritageFlow slideshow generator.
//!
//! Currently a single backend: Google Gemini over the `generateContent`
//! REST surface, covering both structured text generation (JSON mode) and
//! image generation (inline data responses).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{GeminiClient, GeminiResult, protocol};
