//! Hosted site domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::page::Page;

/// Descriptive metadata stored with a hosted site.
///
/// Unknown fields supplied by the client are carried through in `extra`
/// rather than dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMetadata {
    pub name: String,
    pub description: String,
    pub topics: Vec<String>,
    pub message_count: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial metadata as sent by clients on `POST /api/host`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub message_count: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SiteMetadata {
    /// Fills in missing fields with the service defaults: the name falls
    /// back to the first page's name, then "Untitled Site".
    pub fn from_request(metadata: Option<HostMetadata>, pages: &[Page]) -> Self {
        let metadata = metadata.unwrap_or_default();
        Self {
            name: metadata
                .name
                .or_else(|| pages.first().map(|p| p.name.clone()))
                .unwrap_or_else(|| "Untitled Site".to_string()),
            description: metadata
                .description
                .unwrap_or_else(|| "A generated website".to_string()),
            topics: metadata.topics.unwrap_or_else(|| vec!["web".to_string()]),
            message_count: metadata.message_count.unwrap_or(0),
            extra: metadata.extra,
        }
    }
}

/// A hosted site: pages plus metadata under a generated id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub pages: Vec<Page>,
    pub metadata: SiteMetadata,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

/// A site as it appears in listings (no page bodies).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub topics: Vec<String>,
    pub created_at: String,
}

impl From<&Site> for SiteSummary {
    fn from(site: &Site) -> Self {
        Self {
            id: site.id.clone(),
            name: site.metadata.name.clone(),
            description: site.metadata.description.clone(),
            topics: site.metadata.topics.clone(),
            created_at: site.created_at.clone(),
        }
    }
}

/// One page of a site listing, cursor-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteListPage {
    pub sites: Vec<SiteSummary>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_start_after: Option<String>,
}

/// The result of hosting a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostReceipt {
    pub site_id: String,
    pub url: String,
}
