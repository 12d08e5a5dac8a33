//! Stable multi-key sorting of sibling entries
//!
//! Keys are looked up by name in a fixed registry. A `_r` suffix reverses a
//! key. Names that are not registered are skipped, so a typo degrades to the
//! remote's own order instead of failing the listing.

use std::cmp::Ordering;

use crate::entry::Entry;

type Compare = fn(&Entry, &Entry) -> Ordering;

const REVERSE_SUFFIX: &str = "_r";

fn by_name(a: &Entry, b: &Entry) -> Ordering {
    a.name.cmp(&b.name)
}

fn by_size(a: &Entry, b: &Entry) -> Ordering {
    a.size.cmp(&b.size)
}

fn by_mod_time(a: &Entry, b: &Entry) -> Ordering {
    a.mod_time.cmp(&b.mod_time)
}

fn by_version(a: &Entry, b: &Entry) -> Ordering {
    a.version.cmp(&b.version)
}

/// Directories before files.
fn by_type(a: &Entry, b: &Entry) -> Ordering {
    b.is_dir.cmp(&a.is_dir)
}

fn by_id(a: &Entry, b: &Entry) -> Ordering {
    a.id.cmp(&b.id)
}

/// Registered sort keys and their comparators.
const REGISTRY: &[(&str, Compare)] = &[
    ("name", by_name),
    ("size", by_size),
    ("modtime", by_mod_time),
    ("mtime", by_mod_time),
    ("version", by_version),
    ("type", by_type),
    ("id", by_id),
];

/// A resolved sort key.
#[derive(Clone, Copy)]
pub struct SortKey {
    name: &'static str,
    compare: Compare,
    reverse: bool,
}

impl SortKey {
    /// Resolve `raw` against the registry, or `None` for an unknown key.
    pub fn parse(raw: &str) -> Option<SortKey> {
        let raw = raw.trim().to_lowercase();
        let (base, reverse) = match raw.strip_suffix(REVERSE_SUFFIX) {
            Some(base) => (base, true),
            None => (raw.as_str(), false),
        };

        REGISTRY
            .iter()
            .find(|(name, _)| *name == base)
            .map(|&(name, compare)| SortKey {
                name,
                compare,
                reverse,
            })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_reversed(&self) -> bool {
        self.reverse
    }

    fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        let ord = (self.compare)(a, b);
        if self.reverse { ord.reverse() } else { ord }
    }
}

impl std::fmt::Debug for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortKey")
            .field("name", &self.name)
            .field("reverse", &self.reverse)
            .finish()
    }
}

/// Resolve a list of key names, dropping the unknown ones.
pub fn resolve_keys<S: AsRef<str>>(raw: &[S]) -> Vec<SortKey> {
    raw.iter().filter_map(|k| SortKey::parse(k.as_ref())).collect()
}

/// Sort `entries` in place by `keys`, earlier keys taking precedence.
///
/// The sort is stable: entries equal on every key keep their incoming order.
pub fn sort_entries<S: AsRef<str>>(entries: &mut [Entry], keys: &[S]) {
    let keys = resolve_keys(keys);
    if keys.is_empty() {
        return;
    }

    entries.sort_by(|a, b| {
        keys.iter()
            .map(|key| key.compare(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}
