//! Autocomplete over catalog names.

use crate::catalog::Catalog;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// Catalog names containing `partial` (case-insensitive), in catalog order,
/// at most `limit` of them. Blank input suggests nothing.
pub fn suggest<'a>(partial: &str, catalog: &'a Catalog, limit: usize) -> Vec<&'a str> {
    let needle = partial.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    catalog
        .names()
        .filter(|name| name.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}
