//! Prompt pipeline module.
//!
//! # Module Structure
//!
//! - `client`: the `CompletionClient` trait and per-stage configuration
//! - `image`: image classification types and the lookup extension point
//! - `runner`: the two-stage `PromptPipeline`

mod client;
mod image;
mod runner;

pub use client::{ChatMessage, CompletionClient, StageConfig};
pub use image::{ImageDecision, ImageProvider, ImageRef, NoopImageProvider};
pub use runner::{
    MAX_IMAGE_COUNT, PipelineConfig, PipelineResult, PromptPipeline, TRANSCRIPT_WINDOW, image_note,
};
