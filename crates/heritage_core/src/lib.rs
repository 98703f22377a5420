//! Core data types for the HeritageFlow slideshow generator.
//!
//! This crate provides the foundation data types used across all HeritageFlow
//! interfaces: the presentation deck model, the multimodal driver
//! request/response types, and the injectable id source.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod deck;
mod ids;
mod input;
mod message;
mod output;
mod request;
mod role;

pub use deck::{Presentation, Slide, SlideImage, SlideLayout, Theme};
pub use ids::{CountingIds, IdSource, RandomIds};
pub use input::Input;
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, ImageParams};
pub use role::Role;
