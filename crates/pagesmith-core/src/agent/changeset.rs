//! Generation payload shapes.
//!
//! The generation stage returns a different JSON shape per agent variant.
//! Rather than duck-typing the payload, the shapes are modeled as a tagged
//! union keyed by [`AgentKind`] and flattened into plain
//! [`ChangeRecord`]s for the reconciler.

use serde::Deserialize;
use serde_json::Value;

use super::kind::AgentKind;
use crate::page::{ChangeAction, ChangeRecord};
use crate::{PagesmithError, Result};

/// A page body in the split-diff web app shape.
#[derive(Debug, Clone, Deserialize)]
pub struct PageDiff {
    pub name: String,
    #[serde(default, alias = "html", alias = "code")]
    pub content: String,
}

/// A page reference in the split-diff web app shape.
#[derive(Debug, Clone, Deserialize)]
pub struct PageRef {
    #[serde(alias = "path")]
    pub name: String,
}

/// The set of page changes carried by one generation response.
#[derive(Debug, Clone)]
pub enum ChangeSet {
    /// Unified list of create/update/delete records (web app shape).
    Unified(Vec<ChangeRecord>),
    /// Split create/update/delete page lists (older web app shape).
    PageDiffs {
        new_pages: Vec<PageDiff>,
        updated_pages: Vec<PageDiff>,
        deleted_pages: Vec<PageRef>,
    },
    /// Wholesale rewrite of the variant's single fixed file (game/solana).
    SingleFile { target: String, code: Option<String> },
}

impl ChangeSet {
    /// Parses the change portion of a generation payload for the given
    /// agent kind.
    ///
    /// Web app payloads carry either a unified `changes` array or split
    /// `newPages`/`updatedPages`/`deletedPages` lists; game and Solana
    /// payloads carry a `changes` array whose first entry's `code` replaces
    /// the variant's single file.
    pub fn parse(kind: AgentKind, payload: &Value) -> Result<Self> {
        match kind {
            AgentKind::WebApp => Self::parse_web_app(payload),
            AgentKind::GameDev | AgentKind::Solana => {
                // single_file_target is always Some for these kinds
                let target = kind
                    .single_file_target()
                    .ok_or_else(|| PagesmithError::internal("missing single-file target"))?;
                Self::parse_single_file(payload, target)
            }
        }
    }

    fn parse_web_app(payload: &Value) -> Result<Self> {
        if let Some(changes) = payload.get("changes") {
            let records: Vec<ChangeRecord> = serde_json::from_value(changes.clone())
                .map_err(|err| PagesmithError::generation_parse(format!("bad changes array: {err}")))?;
            return Ok(Self::Unified(records));
        }

        let new_pages = parse_list::<PageDiff>(payload, "newPages")?;
        let updated_pages = parse_list::<PageDiff>(payload, "updatedPages")?;
        let deleted_pages = parse_list::<PageRef>(payload, "deletedPages")?;
        Ok(Self::PageDiffs {
            new_pages,
            updated_pages,
            deleted_pages,
        })
    }

    fn parse_single_file(payload: &Value, target: &str) -> Result<Self> {
        let code = match payload.get("changes") {
            Some(Value::Array(changes)) => changes
                .first()
                .and_then(|change| change.get("code").or_else(|| change.get("content")))
                .and_then(|code| code.as_str())
                .map(|code| code.to_string()),
            Some(other) => {
                return Err(PagesmithError::generation_parse(format!(
                    "changes must be an array, got {other}"
                )));
            }
            None => None,
        };
        Ok(Self::SingleFile {
            target: target.to_string(),
            code,
        })
    }

    /// Flattens the set into ordered change records for the reconciler.
    pub fn into_records(self) -> Vec<ChangeRecord> {
        match self {
            Self::Unified(records) => records,
            Self::PageDiffs {
                new_pages,
                updated_pages,
                deleted_pages,
            } => {
                let mut records = Vec::new();
                for page in new_pages {
                    records.push(ChangeRecord::new(page.name, page.content, ChangeAction::Create));
                }
                for page in updated_pages {
                    records.push(ChangeRecord::new(page.name, page.content, ChangeAction::Update));
                }
                for page in deleted_pages {
                    records.push(ChangeRecord::new(page.name, "", ChangeAction::Delete));
                }
                records
            }
            Self::SingleFile { target, code } => code
                .map(|code| vec![ChangeRecord::new(target, code, ChangeAction::Update)])
                .unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Unified(records) => records.is_empty(),
            Self::PageDiffs {
                new_pages,
                updated_pages,
                deleted_pages,
            } => new_pages.is_empty() && updated_pages.is_empty() && deleted_pages.is_empty(),
            Self::SingleFile { code, .. } => code.is_none(),
        }
    }
}

fn parse_list<T: serde::de::DeserializeOwned>(payload: &Value, key: &str) -> Result<Vec<T>> {
    match payload.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|err| PagesmithError::generation_parse(format!("bad {key} list: {err}"))),
    }
}
