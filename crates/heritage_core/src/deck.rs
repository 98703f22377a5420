//! Presentation deck model: decks, slides, layouts, and slide imagery.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Aesthetic theme tag for a presentation.
///
/// The remote capability may suggest a theme, but deck assembly fixes the
/// theme to the default regardless of the suggestion.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Classical aesthetic (the default)
    #[default]
    Classical,
    /// Modern aesthetic
    Modern,
    /// Minimalist aesthetic
    Minimalist,
}

/// Visual composition variant for a slide.
///
/// This is a closed enumeration: wire values outside the three known tags
/// (and absent tags) decode to [`SlideLayout::Centered`], so rendering can
/// stay a total match with no string fallback path.
///
/// # Examples
///
/// ```
/// use heritage_core::SlideLayout;
///
/// let layout: SlideLayout = serde_json::from_str("\"full-image\"").unwrap();
/// assert_eq!(layout, SlideLayout::FullImage);
///
/// // Unrecognized tags fall back to the default composition.
/// let layout: SlideLayout = serde_json::from_str("\"sidebar\"").unwrap();
/// assert_eq!(layout, SlideLayout::Centered);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SlideLayout {
    /// Two-region composition: text block beside an image region
    Split,
    /// Single-column centered text, no image region
    #[default]
    Centered,
    /// Full-bleed image with overlaid title/content block
    FullImage,
}

impl SlideLayout {
    fn from_wire(tag: &str) -> Self {
        match tag {
            "split" => SlideLayout::Split,
            "centered" => SlideLayout::Centered,
            "full-image" => SlideLayout::FullImage,
            _ => SlideLayout::Centered,
        }
    }
}

impl<'de> Deserialize<'de> for SlideLayout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(SlideLayout::from_wire(&tag))
    }
}

/// A self-contained image reference: payload plus declared media type.
///
/// Requires no further fetch; `data_uri` renders the payload the way a
/// browser surface would embed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SlideImage {
    /// Declared media type, e.g. "image/png"
    mime: String,
    /// Raw image bytes
    data: Vec<u8>,
}

impl SlideImage {
    /// Create an image reference from a media type and raw bytes.
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// Render as a `data:` URI with base64 payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use heritage_core::SlideImage;
    ///
    /// let image = SlideImage::new("image/png", vec![1, 2, 3]);
    /// assert!(image.data_uri().starts_with("data:image/png;base64,"));
    /// ```
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.data))
    }

    /// Size of the raw payload in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One page of a presentation.
///
/// Slides decode from the remote response shape; the image reference is
/// never part of the wire format and is back-filled after decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Slide {
    /// Identifier, unique within its presentation and stable for its lifetime
    id: String,
    /// Slide title
    title: String,
    /// Ordered bullet points
    content: Vec<String>,
    /// Visual composition variant
    #[serde(default)]
    layout: SlideLayout,
    /// Illustrative image, absent until back-filled
    #[serde(skip)]
    image: Option<SlideImage>,
    /// Category tag, part of the wire shape but unused by playback
    #[serde(default)]
    category: Option<String>,
}

impl Slide {
    /// Create a slide with no image.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: Vec<String>,
        layout: SlideLayout,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content,
            layout,
            image: None,
            category: None,
        }
    }
}

/// The full generated slide deck for one topic.
///
/// A presentation is created whole or not at all, and replaced wholesale on
/// a new generation request. After creation the slide sequence is immutable
/// in length and order; the only mutation is per-slide image replacement
/// through [`Presentation::merge_image`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Presentation {
    /// Opaque unique token, fresh per generation
    id: String,
    /// The topic the deck was generated for
    topic: String,
    /// Aesthetic theme tag
    theme: Theme,
    /// Slides in presentation order
    slides: Vec<Slide>,
}

impl Presentation {
    /// Assemble a presentation from decoded slides.
    pub fn new(
        id: impl Into<String>,
        topic: impl Into<String>,
        theme: Theme,
        slides: Vec<Slide>,
    ) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            theme,
            slides,
        }
    }

    /// Number of slides in the deck.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Look up a slide by id.
    pub fn slide(&self, slide_id: &str) -> Option<&Slide> {
        self.slides.iter().find(|slide| slide.id == slide_id)
    }

    /// Replace the image reference of the slide with the given id.
    ///
    /// Returns `true` if a slide matched. All other slides are untouched;
    /// applying merges for distinct slide ids in any order yields the same
    /// deck, and re-applying a merge is idempotent. A merge always carries
    /// an image, so a slide's reference never reverts to absent.
    pub fn merge_image(&mut self, slide_id: &str, image: SlideImage) -> bool {
        match self.slides.iter_mut().find(|slide| slide.id == slide_id) {
            Some(slide) => {
                slide.image = Some(image);
                true
            }
            None => false,
        }
    }
}
