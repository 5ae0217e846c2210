// Tab registry for request editor sessions.
//
// # Mutex Usage Policy
//
//   - `tokio::sync::Mutex`    - serialises the registry's read-then-write
//                               sequences. Held across store `.await`s, so it
//                               must be the async mutex.
//
//   - `parking_lot::RwLock`   - guards the in-memory store's document list.
//                               Never held across an `.await`.

//! Tab registry for a client-side API-testing tool.
//!
//! Each [`Tab`] is one in-progress request editor session. [`TabRegistry`]
//! layers ordering and a single-active-tab state machine on top of a
//! reactive [`DocumentStore`]:
//!
//! - creating a tab deactivates the previous active tab
//! - removing a tab hands activation to its next (or previous) neighbour
//! - activation is exclusive and idempotent
//! - request fields, per-route state and the last response are written into
//!   the active tab without clobbering other fields
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use reqtab::{MemoryStore, Tab, TabRegistry};
//!
//! # async fn demo() -> reqtab::Result<()> {
//! let registry = TabRegistry::new(Arc::new(MemoryStore::<Tab>::new()));
//! registry.create_tab(Tab::new("Untitled").active()).await?;
//! registry
//!     .set_request_property(serde_json::json!({"Accept": "*/*"}), "headers")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod tab;

pub use error::{RegistryError, Result};
pub use tab::registry::{MemoryTabRegistry, TabRegistry};
pub use tab::request::RequestProperty;
pub use tab::{Tab, TabId, TabPatch, TabProperty, TabSummary};

pub use reqtab_config::{HandOffPolicy, MissingTargetPolicy, RegistryConfig};
pub use reqtab_store::{
    Document, DocumentStore, MemoryStore, Selector, StoreError, StoreResult, Subscription,
};
