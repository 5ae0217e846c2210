//! Typed error variants for the reqtab-store crate.

use thiserror::Error;

/// Errors returned by [`DocumentStore`](crate::DocumentStore) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store cannot currently serve requests.
    ///
    /// The inner string names the operation that was refused.
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    /// A document with the same id is already stored.
    #[error("Document '{0}' already exists")]
    DuplicateId(String),

    /// A read-modify-write transform tried to change the document id.
    #[error("Document id '{0}' is immutable")]
    ImmutableId(String),
}

/// Convenience type alias for store results.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
