//! remtree - depth-bounded listing and querying of remote file trees

pub mod entry;
pub mod error;
pub mod mask;
pub mod output;
pub mod paths;
pub mod progress;
pub mod prompt;
pub mod query;
pub mod remote;
pub mod sort;
pub mod traverse;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use entry::{Entry, FOLDER_MIME_TYPE, Permission};
pub use error::ListError;
pub use mask::TypeMask;
pub use output::{Presentation, render_entry};
pub use progress::{BusyIndicator, NoopIndicator, Spinner};
pub use prompt::{NeverPrompt, Prompter, TerminalPrompter};
pub use query::{MatchPredicate, Meta};
pub use remote::{MemoryStore, PagePair, RemoteError, RemoteStore, Snapshot};
pub use sort::sort_entries;
pub use traverse::{ListOptions, ListReport, Lister, TraversalState, Visit};
