//! Errors surfaced by a listing invocation

use thiserror::Error;

use crate::remote::RemoteError;

#[derive(Error, Debug)]
pub enum ListError {
    /// A page fetch failed and aborted the branch it occurred in.
    #[error("remote listing failed: {0}")]
    Remote(#[from] RemoteError),

    /// A root locator could not be resolved for a reason other than absence.
    #[error("{source}: '{locator}'")]
    Lookup {
        locator: String,
        #[source]
        source: RemoteError,
    },

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

impl ListError {
    /// The root locator this error refers to, if any.
    pub fn locator(&self) -> Option<&str> {
        match self {
            Self::Lookup { locator, .. } => Some(locator),
            _ => None,
        }
    }
}
