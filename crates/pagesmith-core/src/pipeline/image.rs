//! Image-need classification types and the image lookup extension point.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// The stage-1 verdict on whether the task needs images.
///
/// `needs_images` is required; a stage-1 response without it fails the
/// pipeline. The other fields only accompany a positive verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDecision {
    pub needs_images: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// One image offered to the generation stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub alt: String,
}

/// Extension point for image search.
///
/// The pipeline is structurally wired for images (stage 1 classifies the
/// need, stage 2 interpolates the results into its prompt) but no search
/// backend ships with the core: the default provider always returns an
/// empty list, matching the service this replaces, where the lookup was
/// never executed. Implement this trait to plug a real source in.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn search(&self, query: &str, count: u32) -> Result<Vec<ImageRef>>;
}

/// The default no-op provider: never returns images.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopImageProvider;

#[async_trait]
impl ImageProvider for NoopImageProvider {
    async fn search(&self, _query: &str, _count: u32) -> Result<Vec<ImageRef>> {
        Ok(Vec::new())
    }
}
