//! Typed error variants for the tab registry.

use reqtab_store::StoreError;
use thiserror::Error;

use crate::tab::TabId;

/// Errors returned by [`TabRegistry`](crate::TabRegistry) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A store call failed. Propagated unmodified, never retried.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The operation writes into the active tab, but no tab is active.
    #[error("No active tab")]
    NoActiveTab,

    /// No tab has the given id.
    #[error("Unknown tab id '{0}'")]
    UnknownId(TabId),

    /// The route key names one of the request's nested sub-documents.
    #[error("Route '{0}' is reserved")]
    ReservedRoute(String),
}

/// Convenience type alias for registry results.
pub type Result<T> = std::result::Result<T, RegistryError>;
