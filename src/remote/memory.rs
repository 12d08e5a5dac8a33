//! In-process remote store backed by a JSON snapshot
//!
//! Listings are computed up front and then published page by page from a
//! background thread, so consumers see the same two-channel protocol a
//! network-backed store would give them.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::entry::Entry;
use crate::paths::{REMOTE_ROOT_NAME, is_hidden, is_remote_root_like, is_root_like};
use crate::query::{ListQuery, MaskConstraint, MatchPredicate};

use super::{DEFAULT_PAGE_SIZE, PagePair, RemoteError, RemoteStore};

fn default_root_id() -> String {
    "root".to_string()
}

/// Serialised form of a remote tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_root_id")]
    pub root_id: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub team_drives: Vec<Entry>,
    /// Folder id to error message; listing that folder fails after one page.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub listing_failures: HashMap<String, String>,
    /// Locator to error message; resolving it fails as unavailable.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub lookup_failures: HashMap<String, String>,
}

/// A remote store held entirely in memory.
///
/// Entries keep their insertion order, which stands in for the arbitrary
/// order a real remote returns pages in.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    root_id: String,
    entries: Vec<Entry>,
    team_drives: Vec<Entry>,
    listing_failures: HashMap<String, String>,
    lookup_failures: HashMap<String, String>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(default_root_id())
    }
}

impl MemoryStore {
    pub fn new(root_id: impl Into<String>) -> Self {
        Self {
            root_id: root_id.into(),
            entries: Vec::new(),
            team_drives: Vec::new(),
            listing_failures: HashMap::new(),
            lookup_failures: HashMap::new(),
        }
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            entries: snapshot.entries,
            team_drives: snapshot.team_drives,
            listing_failures: snapshot.listing_failures,
            lookup_failures: snapshot.lookup_failures,
            root_id: snapshot.root_id,
        }
    }

    /// Load a store from a JSON snapshot file.
    pub fn load(path: &Path) -> Result<Self, RemoteError> {
        let reader = BufReader::new(File::open(path)?);
        let snapshot: Snapshot = serde_json::from_reader(reader)?;
        debug!(
            entries = snapshot.entries.len(),
            path = %path.display(),
            "loaded snapshot"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            root_id: self.root_id.clone(),
            entries: self.entries.clone(),
            team_drives: self.team_drives.clone(),
            listing_failures: self.listing_failures.clone(),
            lookup_failures: self.lookup_failures.clone(),
        }
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    /// The synthetic root folder.
    pub fn root(&self) -> Entry {
        Entry::dir(self.root_id.clone(), REMOTE_ROOT_NAME)
    }

    pub fn insert(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn insert_team_drive(&mut self, entry: Entry) {
        self.team_drives.push(entry);
    }

    /// Make every listing of `dir_id`'s children fail after its first page.
    pub fn fail_listing(&mut self, dir_id: impl Into<String>, message: impl Into<String>) {
        self.listing_failures.insert(dir_id.into(), message.into());
    }

    /// Make resolving `locator` (by path or id) fail with `Unavailable`.
    pub fn fail_lookup(&mut self, locator: impl Into<String>, message: impl Into<String>) {
        self.lookup_failures.insert(locator.into(), message.into());
    }

    fn check_lookup(&self, locator: &str) -> Result<(), RemoteError> {
        match self.lookup_failures.get(locator) {
            Some(message) => Err(RemoteError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }

    fn child_named(&self, parent_id: &str, name: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| !e.trashed && e.name == name && e.parent_id.as_deref() == Some(parent_id))
    }

    fn resolve_path(&self, path: &str) -> Option<Entry> {
        let trimmed = path.trim();
        if is_root_like(trimmed) || is_remote_root_like(trimmed) {
            return Some(self.root());
        }

        let mut current: Option<&Entry> = None;
        let mut parent_id = self.root_id.as_str();
        for component in trimmed.split('/').filter(|c| !c.is_empty()) {
            let child = self.child_named(parent_id, component)?;
            parent_id = child.id.as_str();
            current = Some(child);
        }
        current.cloned()
    }

    /// Whether `entry` sits anywhere below the folder `ancestor_id`.
    fn is_within(&self, entry: &Entry, ancestor_id: &str, parents: &HashMap<&str, &str>) -> bool {
        let mut cursor = entry.parent_id.as_deref();
        // Bounded by the entry count so a cyclic snapshot cannot spin forever.
        for _ in 0..=self.entries.len() {
            match cursor {
                Some(id) if id == ancestor_id => return true,
                Some(id) => cursor = parents.get(id).copied(),
                None => return false,
            }
        }
        false
    }

    /// Publish `entries` from a background thread, optionally failing after
    /// the first page.
    fn publish(entries: Vec<Entry>, page_size: u32, failure: Option<RemoteError>) -> PagePair {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        } as usize;
        let (tx, pair) = PagePair::channel(page_size);

        thread::spawn(move || {
            let total = entries.len();
            let mut pages = entries.chunks(page_size).enumerate();

            if let Some(failure) = failure {
                if let Some((_, first)) = pages.next() {
                    for entry in first {
                        if !tx.send(entry.clone()) {
                            return;
                        }
                    }
                }
                tx.fail(failure);
                return;
            }

            for (index, page) in pages {
                for entry in page {
                    if !tx.send(entry.clone()) {
                        return;
                    }
                }
                trace!(page = index, size = page.len(), total, "page published");
            }
        });

        pair
    }
}

impl RemoteStore for MemoryStore {
    fn list_page(&self, query: &ListQuery<'_>, page_size: u32, include_hidden: bool) -> PagePair {
        let mask = query.mask;
        // Team drives replace the children of the root only; below that a
        // drive lists like any other folder.
        let candidates: Vec<Entry> = if mask.team_drives() && query.parent_id == self.root_id {
            self.team_drives.clone()
        } else if query.is_trash() {
            self.entries.iter().filter(|e| e.trashed).cloned().collect()
        } else {
            self.entries
                .iter()
                .filter(|e| !e.trashed && e.parent_id.as_deref() == Some(query.parent_id))
                .cloned()
                .collect()
        };

        let selected: Vec<Entry> = candidates
            .into_iter()
            .filter(|e| MaskConstraint::for_mask(mask).all(|c| c.admits(e)))
            .filter(|e| query.predicate.is_none_or(|p| p.matches(e)))
            .filter(|e| !is_hidden(&e.name, include_hidden))
            .collect();

        let failure = self
            .listing_failures
            .get(query.parent_id)
            .map(|message| RemoteError::Listing {
                id: query.parent_id.to_string(),
                message: message.clone(),
            });

        Self::publish(selected, page_size, failure)
    }

    fn find_by_path(&self, path: &str) -> Result<Entry, RemoteError> {
        self.check_lookup(path)?;
        self.resolve_path(path)
            .ok_or_else(|| RemoteError::NotFound(path.to_string()))
    }

    fn find_by_id(&self, id: &str) -> Result<Entry, RemoteError> {
        self.check_lookup(id)?;
        if id == self.root_id {
            return Ok(self.root());
        }
        self.entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))
    }

    fn find_by_path_shared(&self, path: &str) -> PagePair {
        if let Err(err) = self.check_lookup(path) {
            return PagePair::failed(err);
        }
        let Some(target) = self.resolve_path(path) else {
            return PagePair::failed(RemoteError::NotFound(path.to_string()));
        };

        let shared: Vec<Entry> = if target.id == self.root_id {
            self.entries
                .iter()
                .filter(|e| {
                    !e.trashed && e.shared && e.parent_id.as_deref() == Some(target.id.as_str())
                })
                .cloned()
                .collect()
        } else if target.shared {
            vec![target]
        } else {
            Vec::new()
        };

        Self::publish(shared, DEFAULT_PAGE_SIZE, None)
    }

    fn find_matches(
        &self,
        predicate: &MatchPredicate,
        page_size: u32,
        include_hidden: bool,
    ) -> PagePair {
        let scope = predicate.dir_path.trim();
        let scope_id = if is_root_like(scope) || is_remote_root_like(scope) {
            None
        } else {
            match self.resolve_path(scope) {
                Some(dir) => Some(dir.id),
                None => return PagePair::failed(RemoteError::NotFound(scope.to_string())),
            }
        };

        let parents: HashMap<&str, &str> = self
            .entries
            .iter()
            .filter_map(|e| e.parent_id.as_deref().map(|p| (e.id.as_str(), p)))
            .collect();

        let matches: Vec<Entry> = self
            .entries
            .iter()
            .filter(|e| e.trashed == predicate.in_trash)
            .filter(|e| {
                scope_id
                    .as_deref()
                    .is_none_or(|id| self.is_within(e, id, &parents))
            })
            .filter(|e| predicate.matches(e))
            .filter(|e| !is_hidden(&e.name, include_hidden))
            .cloned()
            .collect();

        Self::publish(matches, page_size, None)
    }
}
