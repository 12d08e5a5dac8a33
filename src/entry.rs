//! Remote file and directory records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mime type the remote uses to mark folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// The caller's access level on an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub role: String,
}

/// A file or directory as reported by the remote listing API.
///
/// The traversal engine only ever reads these, except for the display name of
/// a root entry, which may be normalised to an empty string before it is
/// walked. That rewrite never travels back to the remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_dir: bool,
    #[serde(default)]
    pub shared: bool,
    #[serde(default)]
    pub size: u64,
    pub mod_time: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub owner_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_permission: Option<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub trashed: bool,
    #[serde(default)]
    pub starred: bool,
}

impl Entry {
    /// Create a plain file entry owned by nobody.
    pub fn file(id: impl Into<String>, name: impl Into<String>, size: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_dir: false,
            shared: false,
            size,
            mod_time: DateTime::<Utc>::UNIX_EPOCH,
            version: 1,
            owner_names: Vec::new(),
            user_permission: None,
            parent_id: None,
            mime_type: "application/octet-stream".to_string(),
            trashed: false,
            starred: false,
        }
    }

    /// Create a folder entry.
    pub fn dir(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_dir: true,
            mime_type: FOLDER_MIME_TYPE.to_string(),
            ..Self::file(id, name, 0)
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// The role string of the caller's permission, if the remote reported one.
    pub fn role(&self) -> Option<&str> {
        self.user_permission.as_ref().map(|p| p.role.as_str())
    }
}
