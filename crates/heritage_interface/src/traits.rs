//! Trait definitions for generative backends and their capabilities.

use crate::ModelMetadata;
use async_trait::async_trait;
use heritage_core::{GenerateRequest, GenerateResponse};
use heritage_error::HeritageResult;

/// Core trait that all generative backends must implement.
///
/// This provides the minimal interface for a single request/response round
/// trip. Additional capabilities are exposed through optional traits.
#[async_trait]
pub trait HeritageDriver: Send + Sync {
    /// Generate model output given a multimodal request.
    async fn generate(&self, req: &GenerateRequest) -> HeritageResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier used when the request does not name one.
    fn model_name(&self) -> &str;
}

/// Trait for backends that can produce image outputs.
pub trait ImageGeneration: HeritageDriver {
    /// Aspect ratios the backend accepts for image output.
    fn supported_aspect_ratios(&self) -> &[&'static str] {
        &["1:1", "16:9", "9:16", "4:3", "3:4"]
    }

    /// Image formats the backend may return (MIME types).
    fn output_image_formats(&self) -> &[&'static str] {
        &["image/png", "image/jpeg"]
    }
}

/// Trait for querying model metadata and capabilities.
pub trait Metadata: HeritageDriver {
    /// Get comprehensive metadata about this model.
    fn metadata(&self) -> ModelMetadata;

    /// Maximum tokens in input context.
    fn max_input_tokens(&self) -> usize {
        self.metadata().max_input_tokens
    }

    /// Maximum tokens in output.
    fn max_output_tokens(&self) -> usize {
        self.metadata().max_output_tokens
    }
}
