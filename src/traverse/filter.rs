//! Name filtering applied while a directory's pages are collected

use glob::Pattern;
use tracing::warn;

use crate::paths::is_hidden;

/// Drops hidden names and names matching any ignore pattern.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    include_hidden: bool,
    patterns: Vec<Pattern>,
}

impl NameFilter {
    /// Build a filter. Patterns that fail to compile are reported and skipped.
    pub fn new(include_hidden: bool, ignore_patterns: &[String]) -> Self {
        let patterns = ignore_patterns
            .iter()
            .filter_map(|raw| match Pattern::new(raw) {
                Ok(p) => Some(p),
                Err(err) => {
                    warn!(pattern = %raw, error = %err, "ignoring invalid pattern");
                    None
                }
            })
            .collect();

        Self {
            include_hidden,
            patterns,
        }
    }

    /// Check if an entry name should be left out of a listing.
    pub fn is_excluded(&self, name: &str) -> bool {
        if is_hidden(name, self.include_hidden) {
            return true;
        }
        self.patterns.iter().any(|p| p.as_str() == name || p.matches(name))
    }
}
