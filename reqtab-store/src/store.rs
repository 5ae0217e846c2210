//! The async capability contract a document store must provide.

use std::future::Future;

use crate::document::{Document, Selector};
use crate::error::StoreResult;
use crate::subscription::Subscription;

/// Asynchronous, non-transactional document store.
///
/// Every call is individually atomic, but no transaction spans several calls.
/// Callers that need a multi-step invariant (such as "at most one active tab")
/// must serialise their own read-then-write sequences.
///
/// Any operation may fail with [`StoreError::Unavailable`](crate::StoreError::Unavailable).
pub trait DocumentStore<D: Document>: Send + Sync {
    /// Append `doc`, keeping insertion order.
    fn insert(&self, doc: D) -> impl Future<Output = StoreResult<()>> + Send;

    /// First document (in insertion order) matching `selector`.
    fn find_one(&self, selector: &Selector<D>)
    -> impl Future<Output = StoreResult<Option<D>>> + Send;

    /// All documents matching `selector`, in insertion order.
    fn find(&self, selector: &Selector<D>) -> impl Future<Output = StoreResult<Vec<D>>> + Send;

    /// Shallow-merge `patch` into the document with `id`.
    ///
    /// Returns the updated document, or `None` if no document has that id.
    fn update(
        &self,
        id: &str,
        patch: D::Patch,
    ) -> impl Future<Output = StoreResult<Option<D>>> + Send;

    /// Read-modify-write the document with `id` through `transform`.
    ///
    /// Returns the updated document, or `None` if no document has that id.
    fn modify<F>(&self, id: &str, transform: F) -> impl Future<Output = StoreResult<Option<D>>> + Send
    where
        F: FnOnce(&mut D) + Send;

    /// Remove the document with `id`, returning it if it existed.
    fn remove(&self, id: &str) -> impl Future<Output = StoreResult<Option<D>>> + Send;

    /// Subscribe to the first document matching `selector`.
    ///
    /// The subscription replays the latest committed value and then follows
    /// every subsequent change.
    fn subscribe(&self, selector: Selector<D>) -> StoreResult<Subscription<D>>;
}
