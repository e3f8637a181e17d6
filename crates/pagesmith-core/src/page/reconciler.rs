//! Page collection reconciliation.
//!
//! Applies an ordered batch of [`ChangeRecord`]s to a [`PageCollection`]
//! and resolves which page ends up active. The policy mirrors the editing
//! session's observed behavior:
//!
//! - records apply strictly in the order given, never reordered by action;
//! - a `create` naming a path already in the collection replaces that page
//!   in place, keeping paths unique;
//! - any `create` in the batch wins the active pointer over every `update`,
//!   regardless of position (the last create processed wins among several);
//! - deleting the active page falls back to the first remaining page, or to
//!   no active page when the collection empties out.

use chrono::Utc;
use tracing::debug;

use super::model::{ChangeAction, ChangeRecord, Page, PageCollection, PageMetadata, content_checksum};
use super::normalizer::normalize;
use crate::Result;

/// Applies `changes` to `collection`, returning the new collection and the
/// path of the page that should be active afterwards.
///
/// The input collection is not modified. A record with an unknown action
/// rejects the whole batch with
/// [`PagesmithError::UnsupportedAction`](crate::PagesmithError::UnsupportedAction)
/// and nothing is applied.
pub fn apply(
    collection: &PageCollection,
    changes: &[ChangeRecord],
) -> Result<(PageCollection, Option<String>)> {
    // Validate every action up front so a malformed batch never applies
    // partially.
    let mut actions = Vec::with_capacity(changes.len());
    for change in changes {
        actions.push(ChangeAction::parse(&change.action)?);
    }

    let has_create = actions.contains(&ChangeAction::Create);
    let extension = collection.extension().to_string();
    let mut next = collection.clone();
    let mut active = collection.active_path();

    for (change, action) in changes.iter().zip(actions) {
        let path = normalize(&change.name, &extension);
        match action {
            ChangeAction::Create => {
                let checksum = content_checksum(&change.content);
                // A create for a path already in the collection replaces
                // that page in place; paths stay unique keys.
                if let Some(page) = next.pages_mut().iter_mut().find(|p| p.path == path) {
                    debug!(path = %path, "create for existing page, replacing");
                    page.name = change.name.clone();
                    page.content = change.content.clone();
                    let created = page.metadata.as_ref().and_then(|m| m.created.clone());
                    page.metadata = Some(PageMetadata {
                        created,
                        last_modified: Some(Utc::now().to_rfc3339()),
                        size: change.content.len(),
                        checksum,
                    });
                } else {
                    debug!(path = %path, "creating page");
                    next.pages_mut().push(Page {
                        name: change.name.clone(),
                        path: path.clone(),
                        content: change.content.clone(),
                        is_active: true,
                        metadata: Some(PageMetadata {
                            created: Some(Utc::now().to_rfc3339()),
                            last_modified: None,
                            size: change.content.len(),
                            checksum,
                        }),
                    });
                }
                active = Some(path);
            }
            ChangeAction::Update => {
                let Some(page) = next.pages_mut().iter_mut().find(|p| p.path == path) else {
                    debug!(path = %path, "update for unknown page, skipping");
                    continue;
                };
                debug!(path = %path, "updating page");
                page.content = change.content.clone();
                let checksum = content_checksum(&page.content);
                let created = page.metadata.as_ref().and_then(|m| m.created.clone());
                page.metadata = Some(PageMetadata {
                    created,
                    last_modified: Some(Utc::now().to_rfc3339()),
                    size: page.content.len(),
                    checksum,
                });
                if !has_create {
                    active = Some(path);
                }
            }
            ChangeAction::Delete => {
                let before = next.len();
                next.pages_mut().retain(|p| p.path != path);
                if next.len() == before {
                    debug!(path = %path, "delete for unknown page, no-op");
                    continue;
                }
                debug!(path = %path, "deleted page");
                if active.as_deref() == Some(path.as_str()) {
                    active = next.pages().first().map(|p| p.path.clone());
                }
            }
        }
    }

    // Settle the active flags on the final collection so exactly the page
    // behind `active` carries is_active.
    for page in next.pages_mut() {
        page.is_active = Some(page.path.as_str()) == active.as_deref();
    }

    Ok((next, active))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::model::ChangeAction;

    fn page(path: &str, active: bool) -> Page {
        Page {
            name: path.trim_start_matches('/').trim_end_matches(".html").to_string(),
            path: path.to_string(),
            content: format!("<html>{path}</html>"),
            is_active: active,
            metadata: None,
        }
    }

    fn collection(paths: &[(&str, bool)]) -> PageCollection {
        PageCollection::from_pages(
            paths.iter().map(|(p, a)| page(p, *a)).collect(),
            "html",
        )
    }

    #[test]
    fn test_create_appends_and_activates() {
        let before = collection(&[("/index.html", true)]);
        let changes = [ChangeRecord::new("contact", "<html>contact</html>", ChangeAction::Create)];

        let (after, active) = apply(&before, &changes).unwrap();

        assert_eq!(after.len(), 2);
        assert_eq!(active, Some("/contact.html".to_string()));
        assert!(after.get("/contact.html").unwrap().is_active);
        assert!(!after.get("/index.html").unwrap().is_active);
        // Created pages carry checksum metadata.
        let meta = after.get("/contact.html").unwrap().metadata.as_ref().unwrap();
        assert_eq!(meta.checksum, content_checksum("<html>contact</html>"));
        assert_eq!(meta.size, "<html>contact</html>".len());
    }

    #[test]
    fn test_create_wins_active_over_earlier_update() {
        let before = collection(&[("/a.html", true)]);
        let changes = [
            ChangeRecord::new("/a.html", "<html>new a</html>", ChangeAction::Update),
            ChangeRecord::new("/b.html", "<html>b</html>", ChangeAction::Create),
        ];

        let (after, active) = apply(&before, &changes).unwrap();

        assert_eq!(active, Some("/b.html".to_string()));
        assert_eq!(after.get("/a.html").unwrap().content, "<html>new a</html>");
        assert!(!after.get("/a.html").unwrap().is_active);
    }

    #[test]
    fn test_create_wins_active_over_later_update() {
        let before = collection(&[("/a.html", true)]);
        let changes = [
            ChangeRecord::new("/b.html", "<html>b</html>", ChangeAction::Create),
            ChangeRecord::new("/a.html", "<html>new a</html>", ChangeAction::Update),
        ];

        let (_, active) = apply(&before, &changes).unwrap();
        assert_eq!(active, Some("/b.html".to_string()));
    }

    #[test]
    fn test_last_create_wins_among_several() {
        let before = collection(&[("/index.html", true)]);
        let changes = [
            ChangeRecord::new("first", "<html>1</html>", ChangeAction::Create),
            ChangeRecord::new("second", "<html>2</html>", ChangeAction::Create),
        ];

        let (after, active) = apply(&before, &changes).unwrap();
        assert_eq!(after.len(), 3);
        assert_eq!(active, Some("/second.html".to_string()));
    }

    #[test]
    fn test_create_for_existing_path_replaces_in_place() {
        let before = collection(&[("/index.html", false), ("/about.html", true)]);
        let changes = [ChangeRecord::new("about", "<html>about v2</html>", ChangeAction::Create)];

        let (after, active) = apply(&before, &changes).unwrap();

        assert_eq!(after.len(), 2);
        assert_eq!(active, Some("/about.html".to_string()));
        let replaced = after.get("/about.html").unwrap();
        assert!(replaced.is_active);
        assert_eq!(replaced.content, "<html>about v2</html>");
    }

    #[test]
    fn test_duplicate_creates_in_one_batch_keep_one_page() {
        let before = collection(&[]);
        let changes = [
            ChangeRecord::new("about", "<html>v1</html>", ChangeAction::Create),
            ChangeRecord::new("about", "<html>v2</html>", ChangeAction::Create),
        ];

        let (after, active) = apply(&before, &changes).unwrap();

        assert_eq!(after.len(), 1);
        assert_eq!(active, Some("/about.html".to_string()));
        assert_eq!(after.get("/about.html").unwrap().content, "<html>v2</html>");
    }

    #[test]
    fn test_update_activates_without_create() {
        let before = collection(&[("/index.html", true), ("/about.html", false)]);
        let changes = [ChangeRecord::new("/about.html", "<html>about v2</html>", ChangeAction::Update)];

        let (after, active) = apply(&before, &changes).unwrap();

        assert_eq!(active, Some("/about.html".to_string()));
        let updated = after.get("/about.html").unwrap();
        assert!(updated.is_active);
        assert_eq!(updated.content, "<html>about v2</html>");
        let meta = updated.metadata.as_ref().unwrap();
        assert!(meta.last_modified.is_some());
    }

    #[test]
    fn test_update_for_unknown_page_is_noop() {
        let before = collection(&[("/index.html", true)]);
        let changes = [ChangeRecord::new("/ghost.html", "<html/>", ChangeAction::Update)];

        let (after, active) = apply(&before, &changes).unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(active, Some("/index.html".to_string()));
    }

    #[test]
    fn test_delete_falls_back_to_first_remaining() {
        let before = collection(&[("/a.html", true), ("/b.html", false)]);
        let changes = [ChangeRecord::new("/a.html", "", ChangeAction::Delete)];

        let (after, active) = apply(&before, &changes).unwrap();

        assert_eq!(after.len(), 1);
        assert_eq!(active, Some("/b.html".to_string()));
        assert!(after.get("/b.html").unwrap().is_active);
    }

    #[test]
    fn test_delete_to_empty_clears_active() {
        let before = collection(&[("/a.html", true)]);
        let changes = [ChangeRecord::new("/a.html", "", ChangeAction::Delete)];

        let (after, active) = apply(&before, &changes).unwrap();

        assert!(after.is_empty());
        assert_eq!(active, None);
    }

    #[test]
    fn test_delete_of_inactive_page_keeps_active() {
        let before = collection(&[("/a.html", true), ("/b.html", false)]);
        let changes = [ChangeRecord::new("/b.html", "", ChangeAction::Delete)];

        let (after, active) = apply(&before, &changes).unwrap();
        assert_eq!(active, Some("/a.html".to_string()));
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn test_delete_of_unknown_path_leaves_collection_unchanged() {
        let before = collection(&[("/a.html", true), ("/b.html", false)]);
        let changes = [ChangeRecord::new("/ghost.html", "", ChangeAction::Delete)];

        let (after, active) = apply(&before, &changes).unwrap();
        assert_eq!(after, before);
        assert_eq!(active, Some("/a.html".to_string()));
    }

    #[test]
    fn test_unknown_action_rejects_whole_batch() {
        let before = collection(&[("/a.html", true)]);
        let changes = [
            ChangeRecord::new("b", "<html>b</html>", ChangeAction::Create),
            ChangeRecord {
                name: "/a.html".to_string(),
                content: String::new(),
                action: "rename".to_string(),
                reason: None,
            },
        ];

        let err = apply(&before, &changes).unwrap_err();
        assert!(matches!(err, crate::PagesmithError::UnsupportedAction { ref action } if action == "rename"));
    }

    #[test]
    fn test_paths_stay_unique_and_normalized() {
        let before = collection(&[("/index.html", true)]);
        let changes = [
            ChangeRecord::new("about", "<html>a</html>", ChangeAction::Create),
            ChangeRecord::new("//x//y", "<html>xy</html>", ChangeAction::Create),
            ChangeRecord::new("/about.html", "<html>dup</html>", ChangeAction::Create),
            ChangeRecord::new("about", "<html>a2</html>", ChangeAction::Update),
        ];

        let (after, _) = apply(&before, &changes).unwrap();

        let mut paths: Vec<_> = after.pages().iter().map(|p| p.path.clone()).collect();
        assert!(paths.contains(&"/about.html".to_string()));
        assert!(paths.contains(&"/x/y.html".to_string()));
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), after.len());
        assert_eq!(after.get("/about.html").unwrap().content, "<html>a2</html>");
    }

    #[test]
    fn test_identical_content_yields_identical_checksums() {
        let before = collection(&[]);
        let changes = [
            ChangeRecord::new("a", "<html>same</html>", ChangeAction::Create),
            ChangeRecord::new("b", "<html>same</html>", ChangeAction::Create),
        ];

        let (after, _) = apply(&before, &changes).unwrap();
        let sum_a = after.get("/a.html").unwrap().metadata.as_ref().unwrap().checksum.clone();
        let sum_b = after.get("/b.html").unwrap().metadata.as_ref().unwrap().checksum.clone();
        assert_eq!(sum_a, sum_b);
    }

    #[test]
    fn test_changes_apply_in_given_order() {
        // A create followed by a delete of the same page must leave no page
        // behind; reordering by action type would resurrect it.
        let before = collection(&[("/index.html", true)]);
        let changes = [
            ChangeRecord::new("temp", "<html>t</html>", ChangeAction::Create),
            ChangeRecord::new("temp", "", ChangeAction::Delete),
        ];

        let (after, active) = apply(&before, &changes).unwrap();
        assert!(after.get("/temp.html").is_none());
        assert_eq!(active, Some("/index.html".to_string()));
    }
}
