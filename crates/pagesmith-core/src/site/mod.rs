//! Hosted site domain module.
//!
//! # Module Structure
//!
//! - `model`: `Site`, metadata and listing types
//! - `repository`: the `SiteRepository` trait over the external store

mod model;
mod repository;

pub use model::{HostMetadata, HostReceipt, Site, SiteListPage, SiteMetadata, SiteSummary};
pub use repository::SiteRepository;
