//! Page path normalization.
//!
//! Model output names pages loosely ("about", "contact us", "//x//y"). Every
//! path entering a [`PageCollection`](super::PageCollection) goes through
//! [`normalize`] first so lookups and uniqueness checks operate on one
//! canonical form.

/// Canonicalizes a raw page identifier into a stable path key.
///
/// - Prepends `/` when missing.
/// - Collapses runs of `/` into a single `/`.
/// - Appends `.{extension}` unless already present; the bare root `/` maps
///   to `/index.{extension}`.
///
/// Pure and idempotent: `normalize(normalize(x, e), e) == normalize(x, e)`.
pub fn normalize(raw: &str, extension: &str) -> String {
    let mut path = if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    };

    // Collapse any run of consecutive slashes.
    while path.contains("//") {
        path = path.replace("//", "/");
    }

    let suffix = format!(".{extension}");
    if !path.ends_with(&suffix) {
        if path == "/" {
            path = format!("/index.{extension}");
        } else {
            path = format!("{path}.{extension}");
        }
    }
    path
}
