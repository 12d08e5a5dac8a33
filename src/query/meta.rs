//! Option keys carried in the generic meta map

use std::collections::BTreeMap;

/// Free-form options keyed by name, each carrying one or more values.
pub type Meta = BTreeMap<String, Vec<String>>;

pub const SKIP_MIME_KEY: &str = "skip-mime";
pub const MATCH_MIME_KEY: &str = "match-mime";
pub const EXACT_TITLE_KEY: &str = "exact-title";
pub const EXACT_OWNER_KEY: &str = "exact-owner";
pub const MATCH_OWNER_KEY: &str = "match-owner";
pub const NOT_OWNER_KEY: &str = "exclude-owner";
pub const SORT_KEY: &str = "sort";

/// Extract the ordered sort-key list from the `sort` option.
///
/// Every value is comma split and each fragment trimmed, so `"name, size"`
/// and `["name", "size"]` give the same result. Empty fragments are dropped.
pub fn sort_keys(meta: Option<&Meta>) -> Vec<String> {
    let Some(values) = meta.and_then(|m| m.get(SORT_KEY)) else {
        return Vec::new();
    };

    values
        .iter()
        .flat_map(|attr| attr.split(','))
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}
