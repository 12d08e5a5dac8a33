//! Presentation options derived per traversal level

use crate::mask::TypeMask;

/// How rows are laid out at one level of a traversal.
///
/// The mask is fixed for a whole traversal but the parent path changes at
/// every level, so one of these is built per directory visited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    pub minimal: bool,
    pub disk_usage_only: bool,
    pub show_owners: bool,
    pub show_version: bool,
    /// Display path of the directory the rows belong to.
    pub parent: String,
}

impl Presentation {
    pub fn new(mask: TypeMask, parent: impl Into<String>) -> Self {
        Self {
            minimal: mask.minimal(),
            disk_usage_only: mask.disk_usage_only(),
            show_owners: mask.owners(),
            show_version: mask.version(),
            parent: parent.into(),
        }
    }

    pub fn with_parent(&self, parent: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            ..self.clone()
        }
    }
}
