//! Tab documents and the registry coordinating them
//!
//! This module provides the core tab infrastructure including:
//! - `Tab`: one request editor session with its nested request/response data
//! - `TabRegistry`: ordering and single-active-tab protocol over a store
//! - `TabId`: Unique identifier for each tab

pub mod registry;
pub mod request;

use reqtab_store::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use self::request::RequestProperty;

/// Unique identifier for a tab (opaque, immutable once assigned)
pub type TabId = String;

/// A request editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Unique identifier
    pub id: TabId,
    /// Display label
    pub name: String,
    /// Whether this tab is the one presented to the user
    pub is_active: bool,
    /// Nested request/response data
    #[serde(default)]
    pub property: TabProperty,
}

/// Nested data of a tab.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TabProperty {
    #[serde(default)]
    pub request: RequestProperty,
}

/// Display projection of a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSummary {
    pub name: String,
}

/// Shallow partial update of a tab's top-level fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabPatch {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl TabPatch {
    /// Patch that only sets the activation flag.
    pub fn active(is_active: bool) -> Self {
        Self {
            name: None,
            is_active: Some(is_active),
        }
    }

    /// Patch that only renames the tab.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            is_active: None,
        }
    }
}

impl Tab {
    /// Create an inactive tab with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), name)
    }

    /// Create an inactive tab with a caller-chosen id.
    pub fn with_id(id: impl Into<TabId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_active: false,
            property: TabProperty::default(),
        }
    }

    /// Mark the tab as active (builder style).
    pub fn active(mut self) -> Self {
        self.is_active = true;
        self
    }

    /// Seed a request field (builder style).
    pub fn with_request(mut self, route: impl Into<String>, data: Value) -> Self {
        self.property.request.routes.insert(route.into(), data);
        self
    }

    /// Request sub-document.
    pub fn request(&self) -> &RequestProperty {
        &self.property.request
    }

    /// Display projection of this tab.
    pub fn summary(&self) -> TabSummary {
        TabSummary {
            name: self.name.clone(),
        }
    }
}

impl Document for Tab {
    type Patch = TabPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: TabPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}
