//! Live stream of the document matching a selector.

use std::sync::Arc;

use tokio::sync::watch;

use crate::document::{Document, Selector};

/// Reactive view over a [`MemoryStore`](crate::MemoryStore) (or any store
/// publishing snapshots on a watch channel).
///
/// Each value is `Option<D>`: the first document matching the selector, or
/// `None` when nothing matches. The first call to [`next`](Self::next)
/// yields the latest committed value immediately; later calls wait for the
/// value to change. Dropping the subscription cancels it.
pub struct Subscription<D: Document> {
    snapshots: watch::Receiver<Arc<Vec<D>>>,
    selector: Selector<D>,
    /// Last value handed to the caller, `None` before the first emission
    last: Option<Option<D>>,
}

impl<D: Document> Subscription<D> {
    /// Build a subscription over a store's snapshot channel.
    ///
    /// Stores implementing [`DocumentStore`](crate::DocumentStore) publish
    /// every committed document list (in insertion order) on a
    /// `watch::Sender` and hand out receivers through this constructor.
    pub fn from_watch(snapshots: watch::Receiver<Arc<Vec<D>>>, selector: Selector<D>) -> Self {
        Self {
            snapshots,
            selector,
            last: None,
        }
    }

    /// Latest committed match, without waiting and without consuming a change.
    pub fn current(&self) -> Option<D> {
        let docs = self.snapshots.borrow();
        docs.iter().find(|d| self.selector.matches(d)).cloned()
    }

    /// Wait for the next distinct value.
    ///
    /// Returns `None` once the store has been dropped and no further values
    /// can arrive.
    pub async fn next(&mut self) -> Option<Option<D>> {
        if self.last.is_none() {
            let value = self.observe();
            self.last = Some(value.clone());
            return Some(value);
        }

        loop {
            if self.snapshots.changed().await.is_err() {
                log::debug!("Subscription closed: store dropped");
                return None;
            }
            let value = self.observe();
            if self.last.as_ref() != Some(&value) {
                self.last = Some(value.clone());
                return Some(value);
            }
        }
    }

    /// Read the latest snapshot and mark it as seen.
    fn observe(&mut self) -> Option<D> {
        let docs = self.snapshots.borrow_and_update();
        docs.iter().find(|d| self.selector.matches(d)).cloned()
    }
}
