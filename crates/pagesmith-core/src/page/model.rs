//! Page domain model.
//!
//! This module contains the core `Page` entity and the ordered
//! `PageCollection` that one editing session operates on.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Bookkeeping attached to a page when it is created or updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Timestamp when the page was created (RFC 3339), set on create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Timestamp of the last content replacement (RFC 3339), set on update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// Content size in bytes
    pub size: usize,
    /// Lowercase hex SHA-256 of the UTF-8 content bytes
    pub checksum: String,
}

/// One unit of generated content, keyed by a normalized path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Display label
    pub name: String,
    /// Normalized unique key within a collection
    pub path: String,
    /// Generated markup/code body. Accepted as `html` or `code` on the
    /// wire for compatibility with older clients.
    #[serde(alias = "html", alias = "code")]
    pub content: String,
    /// Whether this page is the one currently shown in the preview
    #[serde(default)]
    pub is_active: bool,
    /// Creation/modification bookkeeping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
}

/// The action carried by a [`ChangeRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Create,
    Update,
    Delete,
}

impl ChangeAction {
    /// Parses a raw action string. Anything outside create/update/delete
    /// is rejected so a malformed batch never partially applies.
    pub fn parse(raw: &str) -> crate::Result<Self> {
        match raw {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(crate::PagesmithError::unsupported_action(other)),
        }
    }
}

/// One create/update/delete instruction produced by the generation stage.
///
/// `name` is raw model output and is normalized into a path before use.
/// `action` is kept as the raw string and validated by the reconciler.
/// The content body arrives as `content`, `html` or `code` depending on the
/// agent variant that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub name: String,
    #[serde(default, alias = "html", alias = "code")]
    pub content: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ChangeRecord {
    pub fn new(name: impl Into<String>, content: impl Into<String>, action: ChangeAction) -> Self {
        let action = match action {
            ChangeAction::Create => "create",
            ChangeAction::Update => "update",
            ChangeAction::Delete => "delete",
        };
        Self {
            name: name.into(),
            content: content.into(),
            action: action.to_string(),
            reason: None,
        }
    }
}

/// Computes the lowercase hex SHA-256 checksum of a content body.
pub fn content_checksum(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    hex::encode(digest)
}

/// An ordered sequence of pages with unique paths.
///
/// Insertion order is preserved for created pages and deletions remove in
/// place. The collection carries the content-file extension its paths are
/// normalized against (`html` for sites, `rs` for Solana programs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCollection {
    pages: Vec<Page>,
    extension: String,
}

impl PageCollection {
    /// Creates an empty collection using the given content extension.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            pages: Vec::new(),
            extension: extension.into(),
        }
    }

    /// Creates a collection seeded with a single active placeholder page.
    pub fn seeded(
        extension: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            pages: vec![Page {
                name: name.into(),
                path: path.into(),
                content: content.into(),
                is_active: true,
                metadata: None,
            }],
            extension: extension.into(),
        }
    }

    /// Wraps existing pages (e.g. the `siteStructure` sent by a client).
    pub fn from_pages(pages: Vec<Page>, extension: impl Into<String>) -> Self {
        Self {
            pages,
            extension: extension.into(),
        }
    }

    /// The content-file extension paths are normalized against.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Looks up a page by its normalized path.
    pub fn get(&self, path: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.path == path)
    }

    /// The path of the currently active page, if any.
    pub fn active_path(&self) -> Option<String> {
        self.pages
            .iter()
            .find(|p| p.is_active)
            .map(|p| p.path.clone())
    }

    /// Marks the page at `path` active and all others inactive.
    /// Returns false when no page matches.
    pub fn activate(&mut self, path: &str) -> bool {
        if !self.pages.iter().any(|p| p.path == path) {
            return false;
        }
        for page in &mut self.pages {
            page.is_active = page.path == path;
        }
        true
    }

    pub(crate) fn pages_mut(&mut self) -> &mut Vec<Page> {
        &mut self.pages
    }
}
