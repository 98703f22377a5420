//! Google Gemini API client.
//!
//! This client talks to the `generateContent` REST endpoint for both
//! structured text generation and image generation:
//! - Per-request model selection (different requests can use different models)
//! - JSON mode via response schemas (`responseMimeType` + `responseSchema`)
//! - Image output via `imageConfig` / inline-data response parts
//! - Automatic retry with exponential backoff on transient HTTP errors
//!
//! # Example
//!
//! ```no_run
//! use heritage_models::GeminiClient;
//! use heritage_core::{GenerateRequest, Message, Role};
//! use heritage_interface::HeritageDriver;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//!
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::text(Role::User, "Hello")])
//!     .build()?;
//! let response = client.generate(&request).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::env;
use std::time::Duration;
use tracing::{info, instrument, warn};

use heritage_core::{GenerateRequest, GenerateResponse};
use heritage_error::{GeminiError, GeminiErrorKind, HeritageResult};
use heritage_interface::{HeritageDriver, ImageGeneration, Metadata, ModelMetadata};

use super::GeminiResult;
use super::protocol;

/// Default model when a request does not name one.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// REST endpoint root.
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Google Gemini `generateContent` REST API.
pub struct GeminiClient {
    /// Shared HTTP client
    http: reqwest::Client,
    /// API key for request authentication
    api_key: String,
    /// Default model name when `req.model` is None
    model_name: String,
    /// Retry configuration
    no_retry: bool,
    max_retries: Option<usize>,
    retry_backoff_ms: Option<u64>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .field("no_retry", &self.no_retry)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new Gemini client with the default model.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> HeritageResult<Self> {
        Self::new_internal(DEFAULT_MODEL.to_string()).map_err(Into::into)
    }

    /// Create a new Gemini client with a specific default model.
    #[instrument(name = "gemini_client_new_with_model")]
    pub fn new_with_model(model: impl Into<String> + std::fmt::Debug) -> HeritageResult<Self> {
        Self::new_internal(model.into()).map_err(Into::into)
    }

    /// Create a new Gemini client with retry configuration.
    ///
    /// # Arguments
    ///
    /// * `no_retry` - Disable automatic retry
    /// * `max_retries` - Override maximum retry attempts
    /// * `retry_backoff_ms` - Override initial backoff delay
    #[instrument(name = "gemini_client_new_with_retry")]
    pub fn new_with_retry(
        no_retry: bool,
        max_retries: Option<usize>,
        retry_backoff_ms: Option<u64>,
    ) -> HeritageResult<Self> {
        let mut client = Self::new_internal(DEFAULT_MODEL.to_string())?;
        client.no_retry = no_retry;
        client.max_retries = max_retries;
        client.retry_backoff_ms = retry_backoff_ms;
        Ok(client)
    }

    /// Internal constructor that returns Gemini-specific errors.
    fn new_internal(model_name: String) -> GeminiResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self {
            http,
            api_key,
            model_name,
            no_retry: false,
            max_retries: None,
            retry_backoff_ms: None,
        })
    }

    /// Issue one POST to `models/{model}:generateContent`.
    async fn dispatch(
        &self,
        model_name: &str,
        wire: &protocol::GenerateContentRequest,
    ) -> GeminiResult<GenerateResponse> {
        let url = format!("{}/models/{}:generateContent", BASE_URL, model_name);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(wire)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = protocol::decode_error_message(&body).unwrap_or(body);
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message,
            }));
        }

        let wire_response: protocol::GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::InvalidServerResponse(e.to_string())))?;

        protocol::decode_response(wire_response)
    }

    /// Internal generate method that returns Gemini-specific errors.
    #[instrument(skip_all, fields(model))]
    async fn generate_internal(&self, req: &GenerateRequest) -> GeminiResult<GenerateResponse> {
        use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};

        let model_name = req.model.as_deref().unwrap_or(&self.model_name);
        tracing::Span::current().record("model", model_name);

        let wire = protocol::encode_request(req);

        if self.no_retry {
            return self.dispatch(model_name, &wire).await;
        }

        // Try once to get an error-specific strategy before retrying.
        let first_error = match self.dispatch(model_name, &wire).await {
            Ok(response) => return Ok(response),
            Err(e) => {
                if !e.kind.is_retryable() {
                    warn!(error = %e, "Permanent Gemini API error, failing immediately");
                    return Err(e);
                }
                e
            }
        };

        let (mut initial_ms, mut max_retries, max_delay_secs) =
            first_error.kind.retry_strategy_params();

        // Apply configured overrides
        if let Some(override_backoff) = self.retry_backoff_ms {
            initial_ms = override_backoff;
        }
        if let Some(override_retries) = self.max_retries {
            max_retries = override_retries;
        }

        info!(
            error = %first_error,
            model = model_name,
            initial_backoff_ms = initial_ms,
            max_retries,
            max_delay_secs,
            "Gemini request failed, will retry with configured strategy"
        );

        let retry_strategy = ExponentialBackoff::from_millis(initial_ms)
            .factor(2)
            .max_delay(Duration::from_secs(max_delay_secs))
            .map(jitter)
            .take(max_retries);

        Retry::spawn(retry_strategy, || {
            let model = model_name.to_string();
            let wire = wire.clone();
            let client = self;
            async move {
                match client.dispatch(&model, &wire).await {
                    Ok(response) => Ok(response),
                    Err(e) => {
                        if e.kind.is_retryable() {
                            warn!(error = %e, "Transient Gemini API error, will retry");
                            Err(RetryError::Transient {
                                err: e,
                                retry_after: None,
                            })
                        } else {
                            warn!(error = %e, "Permanent Gemini API error, failing immediately");
                            Err(RetryError::Permanent(e))
                        }
                    }
                }
            }
        })
        .await
    }
}

#[async_trait]
impl HeritageDriver for GeminiClient {
    async fn generate(&self, req: &GenerateRequest) -> HeritageResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    /// Returns the default model name used when `GenerateRequest.model` is None.
    fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl Metadata for GeminiClient {
    /// Returns metadata for the default model.
    ///
    /// Individual requests may use different models by specifying
    /// `GenerateRequest.model`; verify the requested model supports the
    /// features you need.
    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            provider: "gemini",
            model: self.model_name.clone(),
            max_input_tokens: 1_048_576,
            max_output_tokens: 8192,
            supports_json_mode: true,
            supports_image_output: true,
        }
    }
}

impl ImageGeneration for GeminiClient {
    fn supported_aspect_ratios(&self) -> &[&'static str] {
        &["1:1", "16:9", "9:16", "4:3", "3:4"]
    }

    fn output_image_formats(&self) -> &[&'static str] {
        &["image/png", "image/jpeg"]
    }
}
