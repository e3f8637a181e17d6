//! Page domain module.
//!
//! # Module Structure
//!
//! - `model`: `Page`, `PageCollection`, `ChangeRecord` and checksum helpers
//! - `normalizer`: canonical path-key normalization
//! - `reconciler`: applies ordered change batches to a collection

mod model;
mod normalizer;
mod reconciler;

pub use model::{
    ChangeAction, ChangeRecord, Page, PageCollection, PageMetadata, content_checksum,
};
pub use normalizer::normalize;
pub use reconciler::apply;
