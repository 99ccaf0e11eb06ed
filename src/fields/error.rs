//! Error types for field and template operations.

use crate::client::ClientError;

/// Error type for field and template operations.
#[derive(Debug, thiserror::Error)]
pub enum FieldsError {
    /// Repository client error.
    #[error("repository client error: {0}")]
    Client(#[from] ClientError),

    /// A field definition lacks a property every field must have.
    #[error("field definition is missing '{0}'")]
    MissingProperty(&'static str),
}

pub type Result<T> = std::result::Result<T, FieldsError>;
