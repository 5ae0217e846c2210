//! Tab registry coordinating ordering and activation over a document store

use std::sync::Arc;

use reqtab_config::{HandOffPolicy, MissingTargetPolicy, RegistryConfig};
use reqtab_store::{DocumentStore, MemoryStore, Selector, Subscription};
use serde_json::Value;
use tokio::sync::Mutex;

use super::request::RequestProperty;
use super::{Tab, TabPatch};
use crate::error::{RegistryError, Result};

/// Registry backed by the in-memory store
pub type MemoryTabRegistry = TabRegistry<MemoryStore<Tab>>;

fn active_selector() -> Selector<Tab> {
    Selector::new(|tab: &Tab| tab.is_active)
}

/// Manages the tabs of one store: insertion order, removal with hand-off to a
/// neighbour, exclusive activation and nested writes into the active tab.
///
/// The registry keeps no tab state of its own. Every write operation is a
/// sequence of store calls, so writes are serialised behind an async mutex;
/// reads and subscriptions go straight to the store.
pub struct TabRegistry<S> {
    store: Arc<S>,
    config: RegistryConfig,
    /// Single-writer queue for read-then-write sequences
    writer: Mutex<()>,
}

impl MemoryTabRegistry {
    /// Create a registry over a fresh in-memory store.
    pub fn in_memory(config: RegistryConfig) -> Self {
        Self::with_config(Arc::new(MemoryStore::new()), config)
    }
}

impl<S: DocumentStore<Tab>> TabRegistry<S> {
    /// Create a registry with the default configuration
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, RegistryConfig::default())
    }

    /// Create a registry with an explicit configuration
    pub fn with_config(store: Arc<S>, config: RegistryConfig) -> Self {
        Self {
            store,
            config,
            writer: Mutex::new(()),
        }
    }

    /// Underlying store handle
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Active configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// All tabs in insertion order
    pub async fn list_tabs(&self) -> Result<Vec<Tab>> {
        Ok(self.store.find(&Selector::all()).await?)
    }

    /// Insert `tab`, deactivating the current active tab first.
    ///
    /// The tab is stored as given: it only becomes the active tab if the
    /// caller set `is_active`. The previous active tab is deactivated either way.
    pub async fn create_tab(&self, tab: Tab) -> Result<()> {
        let _writer = self.writer.lock().await;

        // Refuse duplicates before touching the current active tab
        if self.store.find_one(&Selector::by_id(&tab.id)).await?.is_some() {
            return Err(reqtab_store::StoreError::DuplicateId(tab.id).into());
        }

        self.deactivate_current().await?;

        let id = tab.id.clone();
        let is_active = tab.is_active;
        self.store.insert(tab).await?;

        log::info!("Created tab {} (active: {})", id, is_active);
        Ok(())
    }

    /// Remove the tab with `id`, handing activation to a neighbour first.
    ///
    /// The next tab is preferred; the previous one is used when the removed
    /// tab is last. With [`HandOffPolicy::Always`] the hand-off also happens
    /// when the removed tab was not the active one.
    pub async fn remove_tab(&self, id: &str) -> Result<()> {
        let _writer = self.writer.lock().await;

        let tabs = self.store.find(&Selector::all()).await?;
        let Some(index) = tabs.iter().position(|t| t.id == id) else {
            return self.missing_target(RegistryError::UnknownId(id.to_string()));
        };

        let hand_off = match self.config.hand_off {
            HandOffPolicy::Always => true,
            HandOffPolicy::ActiveOnly => tabs[index].is_active,
        };
        if hand_off {
            let neighbour = tabs
                .get(index + 1)
                .or_else(|| index.checked_sub(1).and_then(|prev| tabs.get(prev)));
            if let Some(neighbour) = neighbour {
                self.activate_locked(&neighbour.id).await?;
            }
        }

        self.store.remove(id).await?;
        log::info!(
            "Removed tab {} (index {}, remaining: {})",
            id,
            index,
            tabs.len() - 1
        );
        Ok(())
    }

    /// Make the tab with `id` the single active tab.
    ///
    /// Calling this for the tab that is already active is a no-op.
    pub async fn activate_tab(&self, id: &str) -> Result<()> {
        let _writer = self.writer.lock().await;
        self.activate_locked(id).await
    }

    /// Live stream of the active tab.
    ///
    /// Yields the current active tab (or `None`) immediately, then every
    /// change to which tab is active or to the active tab's contents.
    pub fn get_active_tab(&self) -> Result<Subscription<Tab>> {
        Ok(self.store.subscribe(active_selector())?)
    }

    /// The active tab right now, if any
    pub async fn current_active_tab(&self) -> Result<Option<Tab>> {
        Ok(self.store.find_one(&active_selector()).await?)
    }

    /// Set `property.request[route] = data` on the active tab.
    ///
    /// The routes `state` and `response` name the request's nested
    /// sub-documents and are rejected with [`RegistryError::ReservedRoute`]
    /// whatever the [`MissingTargetPolicy`].
    pub async fn set_request_property(&self, data: Value, route: &str) -> Result<()> {
        if RequestProperty::is_reserved_route(route) {
            return Err(RegistryError::ReservedRoute(route.to_string()));
        }
        let key = route.to_string();
        self.modify_active(route, move |tab| {
            tab.property.request.routes.insert(key, data);
        })
        .await
    }

    /// Set `property.request.state[route] = data` on the active tab.
    pub async fn set_request_state(&self, data: Value, route: &str) -> Result<()> {
        let key = route.to_string();
        self.modify_active(route, move |tab| {
            tab.property.request.state.insert(key, data);
        })
        .await
    }

    /// Replace `property.request.response` on the active tab.
    pub async fn set_request_response(&self, data: Value) -> Result<()> {
        self.modify_active("response", move |tab| {
            tab.property.request.response = Some(data);
        })
        .await
    }

    /// Exclusive activation. Caller must hold the writer lock.
    async fn activate_locked(&self, id: &str) -> Result<()> {
        let current = self.store.find_one(&active_selector()).await?;
        if current.as_ref().is_some_and(|t| t.id == id) {
            return Ok(());
        }

        if self.config.missing_target == MissingTargetPolicy::Error
            && self.store.find_one(&Selector::by_id(id)).await?.is_none()
        {
            return Err(RegistryError::UnknownId(id.to_string()));
        }

        if let Some(current) = &current {
            self.store
                .update(&current.id, TabPatch::active(false))
                .await?;
        }

        match self.store.update(id, TabPatch::active(true)).await? {
            Some(_) => log::debug!(
                "Switched active tab {} -> {}",
                current.as_ref().map_or("none", |t| t.id.as_str()),
                id
            ),
            None => log::warn!("Tab {} not found; no tab is active", id),
        }
        Ok(())
    }

    /// Clear the flag on the current active tab, if any. Caller must hold the writer lock.
    async fn deactivate_current(&self) -> Result<()> {
        if let Some(current) = self.store.find_one(&active_selector()).await? {
            self.store
                .update(&current.id, TabPatch::active(false))
                .await?;
            log::debug!("Deactivated tab {}", current.id);
        }
        Ok(())
    }

    /// Read-modify-write the active tab
    async fn modify_active<F>(&self, what: &str, transform: F) -> Result<()>
    where
        F: FnOnce(&mut Tab) + Send,
    {
        let _writer = self.writer.lock().await;

        let Some(active) = self.store.find_one(&active_selector()).await? else {
            return self.missing_target(RegistryError::NoActiveTab);
        };
        self.store.modify(&active.id, transform).await?;
        log::debug!("Updated '{}' on tab {}", what, active.id);
        Ok(())
    }

    fn missing_target(&self, err: RegistryError) -> Result<()> {
        match self.config.missing_target {
            MissingTargetPolicy::Error => Err(err),
            MissingTargetPolicy::Ignore => {
                log::warn!("{}; ignoring", err);
                Ok(())
            }
        }
    }
}
