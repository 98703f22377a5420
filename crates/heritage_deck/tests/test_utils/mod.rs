//! Test utilities for heritage_deck tests.
//!
//! Provides a scripted mock driver and deck fixtures.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use heritage_core::{CountingIds, GenerateRequest, GenerateResponse, Output};
use heritage_deck::{DeckConfig, Orchestrator};
use heritage_error::{GeminiError, GeminiErrorKind, HeritageResult};
use heritage_interface::HeritageDriver;

/// One scripted driver response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Succeed with a text output
    Text(String),
    /// Succeed with an image output
    Image {
        /// Declared media type
        mime: String,
        /// Raw image bytes
        data: Vec<u8>,
    },
    /// Fail with the given kind
    Error(GeminiErrorKind),
}

impl MockResponse {
    fn into_result(self) -> HeritageResult<GenerateResponse> {
        match self {
            MockResponse::Text(text) => Ok(GenerateResponse {
                outputs: vec![Output::Text(text)],
            }),
            MockResponse::Image { mime, data } => Ok(GenerateResponse {
                outputs: vec![Output::Image {
                    mime: Some(mime),
                    data,
                }],
            }),
            MockResponse::Error(kind) => Err(GeminiError::new(kind).into()),
        }
    }
}

/// Scripted driver. Content requests consume the script in order, then
/// fall back to a fixed response (or an error when none is configured);
/// image requests (those carrying `image_output`) get their own fixed
/// behavior so racing back-fill tasks can never steal scripted content
/// responses. Records every request for assertions.
pub struct MockDriver {
    script: Mutex<VecDeque<MockResponse>>,
    fallback: Option<MockResponse>,
    image: Option<MockResponse>,
    calls: Mutex<Vec<GenerateRequest>>,
}

impl MockDriver {
    /// Driver whose content calls always succeed with the given text.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(MockResponse::Text(text.into())),
            image: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Driver whose image calls always succeed with the given image.
    pub fn new_image(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: None,
            image: Some(MockResponse::Image {
                mime: mime.into(),
                data,
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Driver that always fails with the given kind, on both call types.
    pub fn new_error(kind: GeminiErrorKind) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(MockResponse::Error(kind.clone())),
            image: Some(MockResponse::Error(kind)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Driver whose content calls consume the given responses in order.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            fallback: None,
            image: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Set the content response used once the script is exhausted.
    pub fn with_fallback(mut self, fallback: MockResponse) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Set the response for image requests.
    pub fn with_image(mut self, image: MockResponse) -> Self {
        self.image = Some(image);
        self
    }

    /// Number of requests issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Copies of every request issued so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HeritageDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> HeritageResult<GenerateResponse> {
        self.calls.lock().unwrap().push(req.clone());

        if req.image_output.is_some() {
            return self
                .image
                .clone()
                .unwrap_or(MockResponse::Error(GeminiErrorKind::ApiRequest(
                    "no image response scripted".to_string(),
                )))
                .into_result();
        }

        self.script
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or(MockResponse::Error(GeminiErrorKind::ApiRequest(
                "mock script exhausted".to_string(),
            )))
            .into_result()
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Orchestrator over the given driver with deterministic ids and default
/// configuration.
pub fn orchestrator(driver: Arc<MockDriver>) -> Orchestrator {
    Orchestrator::new(driver, Arc::new(CountingIds::new()), DeckConfig::default())
}

/// Deck response JSON with slides `s1..sN` and layouts cycling through the
/// three variants.
pub fn deck_json(topic: &str, slide_count: usize) -> String {
    let layouts = ["split", "centered", "full-image"];
    let slides: Vec<serde_json::Value> = (1..=slide_count)
        .map(|i| {
            serde_json::json!({
                "id": format!("s{}", i),
                "title": format!("第 {} 页", i),
                "content": [format!("要点 {}", i)],
                "layout": layouts[(i - 1) % layouts.len()],
            })
        })
        .collect();

    serde_json::json!({
        "topic": topic,
        "theme": "modern",
        "slides": slides,
    })
    .to_string()
}
