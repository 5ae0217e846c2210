//! Document identity and query predicates.

use std::fmt;
use std::sync::Arc;

/// A value that can live in a [`DocumentStore`](crate::DocumentStore).
///
/// Documents are identified by an immutable string id and support a shallow
/// partial update through their associated [`Document::Patch`] type.
pub trait Document: Clone + PartialEq + Send + Sync + 'static {
    /// Shallow partial applied by [`DocumentStore::update`](crate::DocumentStore::update).
    type Patch: Send;

    /// Unique identifier of this document.
    fn id(&self) -> &str;

    /// Merge `patch` into this document, leaving unset fields untouched.
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Predicate used to select documents for lookups, scans and subscriptions.
///
/// Cloning a selector is cheap; the predicate is shared.
pub struct Selector<D> {
    predicate: Arc<dyn Fn(&D) -> bool + Send + Sync>,
}

impl<D> Selector<D> {
    /// Create a selector from an arbitrary predicate.
    pub fn new(predicate: impl Fn(&D) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Selector matching every document.
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    /// Check whether `doc` satisfies this selector.
    pub fn matches(&self, doc: &D) -> bool {
        (self.predicate)(doc)
    }
}

impl<D: Document> Selector<D> {
    /// Selector matching the document with the given id.
    pub fn by_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(move |doc: &D| doc.id() == id)
    }
}

impl<D> Clone for Selector<D> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<D> fmt::Debug for Selector<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal document used across the crate's unit tests.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Note {
        pub id: String,
        pub title: String,
        pub pinned: bool,
    }

    pub(crate) struct NotePatch {
        pub title: Option<String>,
        pub pinned: Option<bool>,
    }

    impl Note {
        pub(crate) fn new(id: &str, title: &str) -> Self {
            Self {
                id: id.to_string(),
                title: title.to_string(),
                pinned: false,
            }
        }
    }

    impl Document for Note {
        type Patch = NotePatch;

        fn id(&self) -> &str {
            &self.id
        }

        fn apply_patch(&mut self, patch: NotePatch) {
            if let Some(title) = patch.title {
                self.title = title;
            }
            if let Some(pinned) = patch.pinned {
                self.pinned = pinned;
            }
        }
    }

    #[test]
    fn test_by_id_matches_only_that_document() {
        let selector = Selector::<Note>::by_id("b");
        assert!(!selector.matches(&Note::new("a", "first")));
        assert!(selector.matches(&Note::new("b", "second")));
    }

    #[test]
    fn test_all_matches_everything() {
        let selector = Selector::<Note>::all();
        assert!(selector.matches(&Note::new("a", "first")));
    }

    #[test]
    fn test_cloned_selector_shares_predicate() {
        let pinned = Selector::new(|n: &Note| n.pinned);
        let copy = pinned.clone();
        let mut note = Note::new("a", "first");
        assert!(!copy.matches(&note));
        note.pinned = true;
        assert!(copy.matches(&note));
    }
}
