//! Legacy-version naming.
//!
//! Before an edit overwrites a document whose content changed, the old content
//! is copied to `<base>(v_<N>).<ext>`, where N is one more than the highest tag
//! already present for that base name and extension.

use super::types::{DocumentName, StoreError};

const TAG_OPEN: &str = "(v_";
const TAG_CLOSE: char = ')';

/// Split `about(v_3)` into `("about", 3)`. Returns `None` for untagged stems.
pub fn split_tag(stem: &str) -> Option<(&str, u32)> {
    let inner = stem.strip_suffix(TAG_CLOSE)?;
    let open = inner.rfind(TAG_OPEN)?;
    let digits = &inner[open + TAG_OPEN.len()..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let base = &inner[..open];
    if base.is_empty() {
        return None;
    }
    digits.parse().ok().map(|n| (base, n))
}

/// Whether an edit changes the document, ignoring surrounding whitespace.
pub fn content_changed(current: &str, proposed: &str) -> bool {
    current.trim() != proposed.trim()
}

/// Highest legacy tag among `existing` for the same base name and extension.
pub fn latest_version<'a>(
    origin: &DocumentName,
    existing: impl IntoIterator<Item = &'a DocumentName>,
) -> u32 {
    existing
        .into_iter()
        .filter(|name| name.file_type() == origin.file_type())
        .filter_map(|name| split_tag(name.stem()))
        .filter(|(base, _)| *base == origin.stem())
        .map(|(_, n)| n)
        .max()
        .unwrap_or(0)
}

/// Name for the next legacy snapshot of `origin`.
///
/// Fails with `VersionsExhausted` once the highest tag is `u32::MAX`.
pub fn next_legacy_name<'a>(
    origin: &DocumentName,
    existing: impl IntoIterator<Item = &'a DocumentName>,
) -> Result<DocumentName, StoreError> {
    let next = latest_version(origin, existing)
        .checked_add(1)
        .ok_or_else(|| StoreError::VersionsExhausted(origin.to_string()))?;
    Ok(DocumentName::from_parts(
        format!("{}{TAG_OPEN}{next}{TAG_CLOSE}", origin.stem()),
        origin.file_type(),
    ))
}
