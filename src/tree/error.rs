//! Error types for tree-node operations.

use crate::client::ClientError;
use crate::repository::EntryId;

/// Error type for tree-node operations.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The entry cannot be projected into a node.
    #[error("invalid entry {id}: {reason}")]
    InvalidEntry { id: EntryId, reason: String },

    /// A non-root entry has neither a full path nor a parent node.
    #[error("cannot resolve a path for entry {id}")]
    PathResolution { id: EntryId },

    /// A node id that is not a positive integer.
    #[error("invalid node id: {0:?}")]
    InvalidId(String),

    /// No entry exists at the given path.
    #[error("entry not found: {0}")]
    NotFound(String),

    /// Repository client error.
    #[error("repository client error: {0}")]
    Client(#[from] ClientError),
}

impl TreeError {
    pub(crate) fn invalid_entry(id: EntryId, reason: impl Into<String>) -> Self {
        TreeError::InvalidEntry {
            id,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;
