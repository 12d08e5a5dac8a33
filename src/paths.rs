//! Display-path helpers for remote entries
//!
//! Display paths are built by joining a parent path and an entry name with
//! `/`. The store root has no name of its own: any root-like parent joined
//! with a root-like name stays the empty string, so a listing of the root
//! prints `/child` and never `//child`.

/// Name the remote reports for the top of the store.
pub const REMOTE_ROOT_NAME: &str = "My Drive";

/// Whether `p` denotes the logical root: `""`, `"/"` or `"root"`.
pub fn is_root_like(p: &str) -> bool {
    matches!(p, "" | "/" | "root")
}

/// Whether `p` is the remote's own name for its root.
pub fn is_remote_root_like(p: &str) -> bool {
    p == REMOTE_ROOT_NAME
}

/// Dot-files are hidden unless the caller asked for them.
pub fn is_hidden(name: &str, include_hidden: bool) -> bool {
    !include_hidden && name.starts_with('.')
}

/// Parent path used as the display head when a listing starts at `head`.
pub fn normalize_head(head: &str) -> String {
    if is_root_like(head) || is_remote_root_like(head) {
        String::new()
    } else {
        head.to_string()
    }
}

/// Display path a directory's children are printed under.
pub fn child_display_path(parent: &str, name: &str) -> String {
    if is_root_like(parent) && is_root_like(name) {
        String::new()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Display path of a single row.
pub fn row_path(parent: &str, name: &str) -> String {
    format!("{}/{}", parent, name)
}

/// Parent portion of a `/`-separated locator.
///
/// Root-like results collapse to the empty string.
pub fn parent_display_path(locator: &str) -> String {
    let trimmed = locator.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => normalize_head(&trimmed[..idx]),
        None => String::new(),
    }
}
