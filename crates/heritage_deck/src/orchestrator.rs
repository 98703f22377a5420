//! Content orchestration: the structured content call, the best-effort
//! image call, and the per-slide back-fill protocol.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

use heritage_core::{
    GenerateRequest, IdSource, ImageParams, Message, Presentation, Role, Slide, SlideImage, Theme,
};
use heritage_error::{
    GenerationError, GenerationErrorKind, HeritageResult, ImageError, ImageErrorKind,
};
use heritage_interface::HeritageDriver;

use crate::{DeckConfig, DeckEvent, ImagePatch, extract_json};

/// Decoded wire shape of the content response.
///
/// The remote also suggests a theme; deck assembly ignores it and fixes the
/// theme to the default.
#[derive(Debug, Deserialize)]
struct DeckWire {
    topic: String,
    #[serde(default)]
    #[allow(dead_code)]
    theme: Option<String>,
    slides: Vec<Slide>,
}

/// Orchestrates content and image generation against an injected driver.
///
/// The orchestrator never owns or mutates a presentation: it returns new
/// data (or sends it as [`DeckEvent`]s) for the playback controller to
/// merge.
#[derive(Clone)]
pub struct Orchestrator {
    driver: Arc<dyn HeritageDriver>,
    ids: Arc<dyn IdSource>,
    config: DeckConfig,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("provider", &self.driver.provider_name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Create an orchestrator over a driver and id source.
    pub fn new(driver: Arc<dyn HeritageDriver>, ids: Arc<dyn IdSource>, config: DeckConfig) -> Self {
        Self {
            driver,
            ids,
            config,
        }
    }

    /// The active deck configuration.
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Generate the structured content for a topic in a single round trip.
    ///
    /// The response must decode into the expected deck shape: topic, theme,
    /// and ordered slides with id/title/content/layout. Decode failure, an
    /// empty slide list, or duplicate slide ids are fatal for this call;
    /// no partial presentation is ever returned.
    #[instrument(skip(self))]
    pub async fn generate_content(&self, topic: &str) -> HeritageResult<Presentation> {
        let request = GenerateRequest::builder()
            .messages(vec![
                Message::text(
                    Role::System,
                    "You write presentation decks. Respond with a single JSON object \
                     matching the requested schema; output nothing else.",
                ),
                Message::text(Role::User, self.content_prompt(topic)),
            ])
            .model(Some(self.config.content_model.clone()))
            .response_schema(Some(self.deck_schema()))
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Backend(e.to_string())))?;

        let response = self
            .driver
            .generate(&request)
            .await
            .map_err(|e| GenerationError::new(GenerationErrorKind::Backend(e.to_string())))?;

        let text = response
            .first_text()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::NoTextOutput))?;

        let json = extract_json(text)?;
        let wire: DeckWire = serde_json::from_str(&json).map_err(|e| {
            GenerationError::new(GenerationErrorKind::InvalidShape(e.to_string()))
        })?;

        if wire.slides.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyDeck).into());
        }

        let mut seen = HashSet::new();
        for slide in &wire.slides {
            if !seen.insert(slide.id().clone()) {
                return Err(GenerationError::new(GenerationErrorKind::DuplicateSlideId(
                    slide.id().clone(),
                ))
                .into());
            }
        }

        let presentation =
            Presentation::new(self.ids.mint(), wire.topic, Theme::default(), wire.slides);

        info!(
            presentation_id = %presentation.id(),
            slide_count = presentation.slide_count(),
            "Generated presentation content"
        );

        Ok(presentation)
    }

    /// Generate one illustrative image for a slide. Best-effort: every
    /// failure resolves to `None` and is only logged.
    #[instrument(skip(self))]
    pub async fn generate_image(&self, slide_title: &str, topic: &str) -> Option<SlideImage> {
        match self.generate_image_internal(slide_title, topic).await {
            Ok(image) => {
                debug!(bytes = image.len(), "Generated slide image");
                Some(image)
            }
            Err(e) => {
                warn!(error = %e, slide_title, "Image generation failed");
                None
            }
        }
    }

    async fn generate_image_internal(
        &self,
        slide_title: &str,
        topic: &str,
    ) -> Result<SlideImage, ImageError> {
        let request = GenerateRequest::builder()
            .messages(vec![Message::text(
                Role::User,
                self.image_prompt(slide_title, topic),
            )])
            .model(Some(self.config.image_model.clone()))
            .image_output(Some(ImageParams {
                aspect_ratio: self.config.aspect_ratio.clone(),
            }))
            .build()
            .map_err(|e| ImageError::new(ImageErrorKind::Backend(e.to_string())))?;

        let response = self
            .driver
            .generate(&request)
            .await
            .map_err(|e| ImageError::new(ImageErrorKind::Backend(e.to_string())))?;

        let (mime, data) = response
            .first_image()
            .ok_or_else(|| ImageError::new(ImageErrorKind::NoImagePart))?;

        if data.is_empty() {
            return Err(ImageError::new(ImageErrorKind::PayloadDecode(
                "empty image payload".to_string(),
            )));
        }

        Ok(SlideImage::new(
            mime.unwrap_or("image/png"),
            data.to_vec(),
        ))
    }

    /// Launch one image task per slide, independently and concurrently.
    ///
    /// Tasks report usable images as [`DeckEvent::ImageReady`] on the given
    /// channel; completions race and the controller's merge is
    /// order-independent, so no ordering is imposed here.
    pub fn spawn_backfill(&self, presentation: &Presentation, events: &UnboundedSender<DeckEvent>) {
        debug!(
            presentation_id = %presentation.id(),
            slide_count = presentation.slide_count(),
            "Spawning image back-fill tasks"
        );

        for slide in presentation.slides() {
            self.spawn_image_task(
                presentation.id().clone(),
                slide.id().clone(),
                slide.title().clone(),
                presentation.topic().clone(),
                events.clone(),
            );
        }
    }

    /// Spawn a single image task for one slide.
    ///
    /// Used by the back-fill loop and by per-slide refresh. The task sends
    /// nothing when the image call resolves to `None`.
    pub fn spawn_image_task(
        &self,
        presentation_id: String,
        slide_id: String,
        slide_title: String,
        topic: String,
        events: UnboundedSender<DeckEvent>,
    ) {
        let orchestrator = self.clone();
        tokio::spawn(async move {
            if let Some(image) = orchestrator.generate_image(&slide_title, &topic).await {
                // The receiver is gone during shutdown; nothing to do then.
                let _ = events.send(DeckEvent::ImageReady(ImagePatch {
                    presentation_id,
                    slide_id,
                    image,
                }));
            }
        });
    }

    fn content_prompt(&self, topic: &str) -> String {
        format!(
            "Create a professional {count}-slide presentation structure about \"{topic}\" \
             (Intangible Cultural Heritage). Each slide should have a clear title, bullet \
             points (content), and a suggested layout ('split', 'centered', or 'full-image'). \
             Focus on history, significance, specific examples, and conservation efforts. \
             Output in {language}.",
            count = self.config.slide_count,
            topic = topic,
            language = self.config.language,
        )
    }

    fn image_prompt(&self, slide_title: &str, topic: &str) -> String {
        format!(
            "A beautiful, high-quality, professional photography style artistic illustration \
             representing {slide_title} in the context of {topic} (Chinese Intangible Cultural \
             Heritage). Elegant lighting, detailed textures, cultural essence.",
        )
    }

    fn deck_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "topic": { "type": "string" },
                "theme": { "type": "string" },
                "slides": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "title": { "type": "string" },
                            "content": {
                                "type": "array",
                                "items": { "type": "string" }
                            },
                            "layout": {
                                "type": "string",
                                "enum": ["split", "centered", "full-image"]
                            }
                        },
                        "required": ["id", "title", "content", "layout"]
                    }
                }
            },
            "required": ["topic", "theme", "slides"]
        })
    }
}
