//! In-memory [`DocumentStore`] keeping documents in insertion order.
//!
//! The canonical document list lives behind a `parking_lot::RwLock`. Every
//! committed write publishes a fresh snapshot on a `tokio::sync::watch`
//! channel while the write lock is still held, so subscribers observe writes
//! in commit order and a new subscriber always starts from the latest
//! committed state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::document::{Document, Selector};
use crate::error::{StoreError, StoreResult};
use crate::store::DocumentStore;
use crate::subscription::Subscription;

type Snapshot<D> = Arc<Vec<D>>;

/// In-memory reactive document store.
pub struct MemoryStore<D: Document> {
    /// Documents in insertion order
    docs: RwLock<Snapshot<D>>,
    /// Latest committed snapshot, observed by subscriptions
    snapshots: watch::Sender<Snapshot<D>>,
    /// Cleared to simulate an outage
    available: AtomicBool,
}

impl<D: Document> MemoryStore<D> {
    /// Create an empty, available store.
    pub fn new() -> Self {
        let initial: Snapshot<D> = Arc::new(Vec::new());
        let (snapshots, _) = watch::channel(Arc::clone(&initial));
        Self {
            docs: RwLock::new(initial),
            snapshots,
            available: AtomicBool::new(true),
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    /// Toggle availability. While unavailable every operation fails with
    /// [`StoreError::Unavailable`]; existing subscriptions stay open.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
        if available {
            log::info!("Document store available");
        } else {
            log::warn!("Document store marked unavailable");
        }
    }

    /// Whether the store currently serves requests.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.snapshots.receiver_count()
    }

    fn ensure_available(&self, operation: &str) -> StoreResult<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(StoreError::Unavailable(operation.to_string()))
        }
    }

    /// Must be called with the write lock held.
    fn publish(&self, docs: &Snapshot<D>) {
        self.snapshots.send_replace(Arc::clone(docs));
    }

    fn position(docs: &[D], id: &str) -> Option<usize> {
        docs.iter().position(|d| d.id() == id)
    }
}

impl<D: Document> Default for MemoryStore<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> DocumentStore<D> for MemoryStore<D> {
    async fn insert(&self, doc: D) -> StoreResult<()> {
        self.ensure_available("insert")?;
        let mut docs = self.docs.write();
        if Self::position(&docs, doc.id()).is_some() {
            return Err(StoreError::DuplicateId(doc.id().to_string()));
        }
        log::trace!("Inserting document {} (total: {})", doc.id(), docs.len() + 1);
        Arc::make_mut(&mut docs).push(doc);
        self.publish(&docs);
        Ok(())
    }

    async fn find_one(&self, selector: &Selector<D>) -> StoreResult<Option<D>> {
        self.ensure_available("find_one")?;
        let docs = self.docs.read();
        Ok(docs.iter().find(|d| selector.matches(d)).cloned())
    }

    async fn find(&self, selector: &Selector<D>) -> StoreResult<Vec<D>> {
        self.ensure_available("find")?;
        let docs = self.docs.read();
        Ok(docs.iter().filter(|d| selector.matches(d)).cloned().collect())
    }

    async fn update(&self, id: &str, patch: D::Patch) -> StoreResult<Option<D>> {
        self.ensure_available("update")?;
        let mut docs = self.docs.write();
        let Some(index) = Self::position(&docs, id) else {
            return Ok(None);
        };
        let mut working = docs[index].clone();
        working.apply_patch(patch);
        if working != docs[index] {
            Arc::make_mut(&mut docs)[index] = working.clone();
            self.publish(&docs);
        }
        Ok(Some(working))
    }

    async fn modify<F>(&self, id: &str, transform: F) -> StoreResult<Option<D>>
    where
        F: FnOnce(&mut D) + Send,
    {
        self.ensure_available("modify")?;
        let mut docs = self.docs.write();
        let Some(index) = Self::position(&docs, id) else {
            return Ok(None);
        };
        // Transform a copy so a rejected change leaves the stored document intact
        let mut working = docs[index].clone();
        transform(&mut working);
        if working.id() != id {
            return Err(StoreError::ImmutableId(id.to_string()));
        }
        if working != docs[index] {
            Arc::make_mut(&mut docs)[index] = working.clone();
            self.publish(&docs);
        }
        Ok(Some(working))
    }

    async fn remove(&self, id: &str) -> StoreResult<Option<D>> {
        self.ensure_available("remove")?;
        let mut docs = self.docs.write();
        let Some(index) = Self::position(&docs, id) else {
            return Ok(None);
        };
        let removed = Arc::make_mut(&mut docs).remove(index);
        log::trace!("Removed document {} (total: {})", id, docs.len());
        self.publish(&docs);
        Ok(Some(removed))
    }

    fn subscribe(&self, selector: Selector<D>) -> StoreResult<Subscription<D>> {
        self.ensure_available("subscribe")?;
        Ok(Subscription::from_watch(self.snapshots.subscribe(), selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::tests::{Note, NotePatch};

    async fn store_with(ids: &[&str]) -> MemoryStore<Note> {
        let store = MemoryStore::new();
        for id in ids {
            store
                .insert(Note::new(id, &format!("note {id}")))
                .await
                .expect("insert");
        }
        store
    }

    fn ids(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_find_preserves_insertion_order() {
        let store = store_with(&["c", "a", "b"]).await;
        let all = store.find(&Selector::all()).await.unwrap();
        assert_eq!(ids(&all), vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = store_with(&["a"]).await;
        let err = store.insert(Note::new("a", "again")).await.unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("a".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_find_one_returns_first_match() {
        let store = store_with(&["a", "b", "c"]).await;
        store
            .update(
                "b",
                NotePatch {
                    title: None,
                    pinned: Some(true),
                },
            )
            .await
            .unwrap();
        store
            .update(
                "c",
                NotePatch {
                    title: None,
                    pinned: Some(true),
                },
            )
            .await
            .unwrap();

        let pinned = Selector::new(|n: &Note| n.pinned);
        let found = store.find_one(&pinned).await.unwrap();
        assert_eq!(found.map(|n| n.id), Some("b".to_string()));
    }

    #[tokio::test]
    async fn test_update_merges_only_set_fields() {
        let store = store_with(&["a"]).await;
        let updated = store
            .update(
                "a",
                NotePatch {
                    title: None,
                    pinned: Some(true),
                },
            )
            .await
            .unwrap()
            .expect("document exists");
        assert!(updated.pinned);
        assert_eq!(updated.title, "note a");
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let store = store_with(&["a"]).await;
        let result = store
            .update(
                "zz",
                NotePatch {
                    title: Some("x".to_string()),
                    pinned: None,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_modify_rejects_id_change_and_keeps_document() {
        let store = store_with(&["a"]).await;
        let err = store
            .modify("a", |n| {
                n.id = "b".to_string();
                n.title = "changed".to_string();
            })
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::ImmutableId("a".to_string()));

        let stored = store.find_one(&Selector::by_id("a")).await.unwrap().unwrap();
        assert_eq!(stored.title, "note a");
    }

    #[tokio::test]
    async fn test_remove_returns_document() {
        let store = store_with(&["a", "b"]).await;
        let removed = store.remove("a").await.unwrap();
        assert_eq!(removed.map(|n| n.id), Some("a".to_string()));
        assert!(store.remove("a").await.unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_operation() {
        let store = store_with(&["a"]).await;
        store.set_available(false);

        assert!(matches!(
            store.insert(Note::new("b", "b")).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.find(&Selector::all()).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.remove("a").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.subscribe(Selector::all()),
            Err(StoreError::Unavailable(_))
        ));

        store.set_available(true);
        assert_eq!(store.find(&Selector::all()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dropping_subscription_releases_receiver() {
        let store = store_with(&["a"]).await;
        let sub = store.subscribe(Selector::all()).unwrap();
        assert_eq!(store.subscriber_count(), 1);
        drop(sub);
        assert_eq!(store.subscriber_count(), 0);
    }
}
