//! Remote page sources
//!
//! The traversal engine never talks to a remote directly. It asks a
//! [`RemoteStore`] for a [`PagePair`]: two channels filled by the store's own
//! paging logic, one carrying entries and one carrying at most one fatal
//! error. The entry channel closing with nothing on the error channel marks
//! natural completion.

mod memory;

use crossbeam_channel::{Receiver, Sender, bounded, never, select};
use thiserror::Error;

use crate::entry::Entry;
use crate::query::{ListQuery, MatchPredicate};

pub use memory::{MemoryStore, Snapshot};

/// Page size used when a caller asks for zero.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("path not found: {0}")]
    NotFound(String),

    #[error("listing '{id}' failed: {message}")]
    Listing { id: String, message: String },

    #[error("remote unavailable: {0}")]
    Unavailable(String),

    #[error("cannot read snapshot: {0}")]
    SnapshotIo(#[from] std::io::Error),

    #[error("invalid snapshot: {0}")]
    SnapshotFormat(#[from] serde_json::Error),
}

impl RemoteError {
    /// Whether this is the tolerated "locator does not exist" failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// A remote file store that can resolve locators and page through listings.
///
/// Implementations run their paging wherever they like (a thread, an async
/// task, a blocking loop) and publish onto the channel pair they return.
pub trait RemoteStore: Send + Sync {
    /// Stream the children selected by `query`, `page_size` entries at a time.
    fn list_page(&self, query: &ListQuery<'_>, page_size: u32, include_hidden: bool) -> PagePair;

    /// Resolve a `/`-separated path. Absence is `RemoteError::NotFound`.
    fn find_by_path(&self, path: &str) -> Result<Entry, RemoteError>;

    /// Resolve an opaque identifier. Absence is `RemoteError::NotFound`.
    fn find_by_id(&self, id: &str) -> Result<Entry, RemoteError>;

    /// Stream the shared entries found at `path`.
    fn find_by_path_shared(&self, path: &str) -> PagePair;

    /// Stream every entry matching `predicate` within its scope path.
    fn find_matches(&self, predicate: &MatchPredicate, page_size: u32, include_hidden: bool)
    -> PagePair;
}

/// Producer half of a [`PagePair`].
pub struct PageSender {
    entries: Sender<Entry>,
    errors: Sender<RemoteError>,
}

impl PageSender {
    /// Publish one entry. Returns `false` once the consumer has gone away.
    pub fn send(&self, entry: Entry) -> bool {
        self.entries.send(entry).is_ok()
    }

    /// Publish a fatal error and close both channels.
    pub fn fail(self, err: RemoteError) {
        let _ = self.errors.send(err);
    }
}

/// Consumer half: an entry channel plus an error channel.
pub struct PagePair {
    entries: Receiver<Entry>,
    errors: Receiver<RemoteError>,
}

impl PagePair {
    /// Create a connected pair with room for `capacity` buffered entries.
    pub fn channel(capacity: usize) -> (PageSender, PagePair) {
        let (entry_tx, entry_rx) = bounded(capacity.max(1));
        let (err_tx, err_rx) = bounded(1);
        (
            PageSender {
                entries: entry_tx,
                errors: err_tx,
            },
            PagePair {
                entries: entry_rx,
                errors: err_rx,
            },
        )
    }

    /// A pair that fails immediately with `err`.
    pub fn failed(err: RemoteError) -> PagePair {
        let (tx, pair) = PagePair::channel(1);
        tx.fail(err);
        pair
    }

    /// Block until the next entry, the end of the stream, or an error.
    ///
    /// `Ok(None)` means the entry channel closed with no error pending. An
    /// error ends the fetch; callers must not keep reading after one.
    pub fn next_entry(&mut self) -> Result<Option<Entry>, RemoteError> {
        loop {
            select! {
                recv(self.errors) -> msg => match msg {
                    Ok(err) => return Err(err),
                    // No error will ever arrive; stop selecting on a dead channel.
                    Err(_) => self.errors = never(),
                },
                recv(self.entries) -> msg => match msg {
                    Ok(entry) => return Ok(Some(entry)),
                    Err(_) => {
                        // The producer may have queued an error right before hanging up.
                        return match self.errors.try_recv() {
                            Ok(err) => Err(err),
                            Err(_) => Ok(None),
                        };
                    }
                },
            }
        }
    }

    /// Drain the stream into a vector, stopping at the first error.
    pub fn collect_all(mut self) -> Result<Vec<Entry>, RemoteError> {
        let mut out = Vec::new();
        while let Some(entry) = self.next_entry()? {
            out.push(entry);
        }
        Ok(out)
    }
}
