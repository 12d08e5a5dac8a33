//! Configuration for listing invocations

use crate::mask::TypeMask;
use crate::query::Meta;
use crate::remote::DEFAULT_PAGE_SIZE;

/// Configuration for a listing invocation.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Root locators (paths or ids) or, for match listings, search terms.
    pub sources: Vec<String>,
    /// Levels to descend. Negative means unbounded, zero lists nothing below
    /// the roots.
    pub depth: i64,
    pub type_mask: TypeMask,
    pub in_trash: bool,
    /// Include dot-files.
    pub hidden: bool,
    pub page_size: u32,
    /// Never ask "More?" between levels.
    pub no_prompt: bool,
    /// Scope path for match listings, and display head for their results.
    pub path: String,
    /// Filter and sort options keyed by name (see `query` for the keys).
    pub meta: Option<Meta>,
    /// Glob patterns; entries whose name matches any are skipped.
    pub ignore_patterns: Vec<String>,
}

impl ListOptions {
    /// Whether this invocation browses the trash, by flag or by mask.
    pub fn trash_mode(&self) -> bool {
        self.in_trash || self.type_mask.in_trash()
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            depth: 1,
            type_mask: TypeMask::NONE,
            in_trash: false,
            hidden: false,
            page_size: DEFAULT_PAGE_SIZE,
            no_prompt: false,
            path: String::new(),
            meta: None,
            ignore_patterns: Vec::new(),
        }
    }
}
