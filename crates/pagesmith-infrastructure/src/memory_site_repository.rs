//! In-memory site repository.
//!
//! The development and test stand-in for the external site store. Sites
//! live in process memory and vanish on restart; a production deployment
//! swaps in a client for a real object/document store behind the same
//! trait.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use pagesmith_core::page::Page;
use pagesmith_core::site::{
    HostReceipt, Site, SiteListPage, SiteMetadata, SiteRepository, SiteSummary,
};

/// Listing page size for `list_sites`.
const PAGE_SIZE: usize = 12;

/// How many sites `list_recent_sites` returns.
const RECENT_LIMIT: usize = 8;

/// A `SiteRepository` backed by a vector in process memory.
#[derive(Default)]
pub struct InMemorySiteRepository {
    sites: RwLock<Vec<Site>>,
}

impl InMemorySiteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SiteRepository for InMemorySiteRepository {
    async fn host_site(
        &self,
        pages: Vec<Page>,
        site_id: String,
        metadata: SiteMetadata,
    ) -> Result<HostReceipt> {
        let site = Site {
            id: site_id.clone(),
            pages,
            metadata,
            created_at: Utc::now().to_rfc3339(),
        };

        let mut sites = self.sites.write().await;
        sites.push(site);
        info!(site_id = %site_id, total = sites.len(), "hosted site");

        Ok(HostReceipt {
            url: format!("/sites/{site_id}"),
            site_id,
        })
    }

    async fn list_sites(&self, start_after: Option<String>) -> Result<SiteListPage> {
        let sites = self.sites.read().await;

        // An unknown or absent cursor starts from the beginning.
        let start = start_after
            .and_then(|cursor| sites.iter().position(|site| site.id == cursor))
            .map(|index| index + 1)
            .unwrap_or(0);

        let window: Vec<SiteSummary> = sites
            .iter()
            .skip(start)
            .take(PAGE_SIZE)
            .map(SiteSummary::from)
            .collect();
        let has_more = start + window.len() < sites.len();
        let next_start_after = if has_more {
            window.last().map(|site| site.id.clone())
        } else {
            None
        };

        Ok(SiteListPage {
            sites: window,
            has_more,
            next_start_after,
        })
    }

    async fn list_recent_sites(&self) -> Result<Vec<SiteSummary>> {
        let sites = self.sites.read().await;
        // Reverse insertion order first so timestamp ties still rank the
        // later-hosted site as newer under the stable sort.
        let mut summaries: Vec<SiteSummary> = sites.iter().rev().map(SiteSummary::from).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries.truncate(RECENT_LIMIT);
        Ok(summaries)
    }

    async fn get_site(&self, site_id: &str) -> Result<Option<Site>> {
        let sites = self.sites.read().await;
        Ok(sites.iter().find(|site| site.id == site_id).cloned())
    }
}
