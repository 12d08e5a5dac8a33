//! Test utilities for building remote trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempDir;

use crate::entry::Entry;
use crate::progress::BusyIndicator;
use crate::prompt::Prompter;
use crate::remote::{MemoryStore, Snapshot};

/// Builds a [`MemoryStore`] from `/`-separated paths.
///
/// Parent folders are created on demand. Ids are derived from the path, so
/// `docs/a.txt` gets the id `docs/a.txt` and can be looked up by it.
pub struct TreeBuilder {
    store: MemoryStore,
    dirs: HashSet<String>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::default(),
            dirs: HashSet::new(),
        }
    }

    fn parent_of(&mut self, path: &str) -> String {
        match path.rsplit_once('/') {
            Some((parent, _)) => {
                self.ensure_dir(parent);
                parent.to_string()
            }
            None => self.store.root_id().to_string(),
        }
    }

    fn ensure_dir(&mut self, path: &str) {
        if !self.dirs.insert(path.to_string()) {
            return;
        }
        let parent = self.parent_of(path);
        let name = path.rsplit('/').next().unwrap_or(path);
        self.store.insert(Entry::dir(path, name).with_parent(parent));
    }

    /// Add a folder (and any missing ancestors).
    pub fn dir(mut self, path: &str) -> Self {
        self.ensure_dir(path.trim_matches('/'));
        self
    }

    /// Add a file of `size` bytes.
    pub fn file(self, path: &str, size: u64) -> Self {
        self.file_with(path, size, |_| {})
    }

    /// Add a file and adjust it before it is stored.
    pub fn file_with(mut self, path: &str, size: u64, edit: impl FnOnce(&mut Entry)) -> Self {
        let path = path.trim_matches('/');
        let parent = self.parent_of(path);
        let name = path.rsplit('/').next().unwrap_or(path);
        let mut entry = Entry::file(path, name, size).with_parent(parent);
        edit(&mut entry);
        self.store.insert(entry);
        self
    }

    /// Add an entry as is.
    pub fn entry(mut self, entry: Entry) -> Self {
        self.store.insert(entry);
        self
    }

    /// Make listing the children of folder `path` fail after its first page.
    pub fn failing_listing(mut self, path: &str, message: &str) -> Self {
        self.store.fail_listing(path.trim_matches('/'), message);
        self
    }

    /// Make resolving `locator` fail with something other than "not found".
    pub fn failing_lookup(mut self, locator: &str, message: &str) -> Self {
        self.store.fail_lookup(locator, message);
        self
    }

    pub fn build(self) -> MemoryStore {
        self.store
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot written to a temporary directory.
///
/// The directory is cleaned up when dropped.
pub struct SnapshotFile {
    dir: TempDir,
    path: PathBuf,
}

impl SnapshotFile {
    pub fn write(snapshot: &Snapshot) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("remtree.json");
        let json = serde_json::to_string_pretty(snapshot).expect("Failed to encode snapshot");
        fs::write(&path, json).expect("Failed to write snapshot");
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Prompter that replays canned answers and counts how often it was asked.
///
/// Once the answers run out every further question is answered "yes".
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<bool>>,
    asked: RefCell<usize>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            asked: RefCell::new(0),
        }
    }

    pub fn asked(&self) -> usize {
        *self.asked.borrow()
    }
}

impl Prompter for ScriptedPrompter {
    fn can_prompt(&self) -> bool {
        true
    }

    fn confirm_continue(&self) -> bool {
        *self.asked.borrow_mut() += 1;
        self.answers.borrow_mut().pop_front().unwrap_or(true)
    }
}

/// Busy indicator that records every call made to it.
#[derive(Default)]
pub struct RecordingIndicator {
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingIndicator {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("indicator lock poisoned").clone()
    }

    fn push(&self, call: &'static str) {
        self.calls.lock().expect("indicator lock poisoned").push(call);
    }
}

impl BusyIndicator for RecordingIndicator {
    fn play(&self) {
        self.push("play");
    }

    fn pause(&self) {
        self.push("pause");
    }

    fn stop(&self) {
        self.push("stop");
    }
}
