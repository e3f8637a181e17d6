//! Agent variants module.
//!
//! # Module Structure
//!
//! - `kind`: the `AgentKind` variant enum and per-variant policy
//! - `changeset`: tagged generation payload shapes (`ChangeSet`)

mod changeset;
mod kind;

pub use changeset::{ChangeSet, PageDiff, PageRef};
pub use kind::AgentKind;
