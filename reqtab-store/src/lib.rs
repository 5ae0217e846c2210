//! Reactive document store backing the reqtab tab registry.
//!
//! This crate provides the storage collaborator the registry is layered on:
//!
//! - [`Document`] and [`Selector`] - document identity and query predicates
//! - [`DocumentStore`] - the async capability contract (insert, point lookup,
//!   ordered scan, shallow update, read-modify-write, removal, subscription)
//! - [`MemoryStore`] - in-memory implementation keeping insertion order
//! - [`Subscription`] - live stream of the document matching a selector

pub mod document;
pub mod error;
pub mod memory;
pub mod store;
pub mod subscription;

pub use document::{Document, Selector};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::DocumentStore;
pub use subscription::Subscription;
