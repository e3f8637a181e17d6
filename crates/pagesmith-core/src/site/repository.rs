//! Site repository trait.
//!
//! Defines the narrow interface over the external persistence service.
//! The core never reimplements storage; implementations live in the
//! infrastructure layer (an in-memory store for development and tests, or
//! a client for a real object/document store).

use anyhow::Result;
use async_trait::async_trait;

use super::model::{HostReceipt, Site, SiteListPage, SiteMetadata, SiteSummary};
use crate::page::Page;

/// An abstract store for hosted sites.
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// Stores a site under `site_id` and returns where it can be reached.
    async fn host_site(
        &self,
        pages: Vec<Page>,
        site_id: String,
        metadata: SiteMetadata,
    ) -> Result<HostReceipt>;

    /// Lists sites in creation order, resuming after the `start_after`
    /// cursor when given.
    async fn list_sites(&self, start_after: Option<String>) -> Result<SiteListPage>;

    /// The newest sites, for the landing banner.
    async fn list_recent_sites(&self) -> Result<Vec<SiteSummary>>;

    /// Fetches a full site by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Site))`: site found
    /// - `Ok(None)`: no site under that id
    /// - `Err(_)`: store failure
    async fn get_site(&self, site_id: &str) -> Result<Option<Site>>;
}
