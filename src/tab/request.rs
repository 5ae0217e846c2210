//! Request sub-document of a tab.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Route keys that would alias the nested sub-documents.
pub const RESERVED_ROUTES: [&str; 2] = ["state", "response"];

/// Request editor data of a tab.
///
/// Serialises as a single object: route fields sit beside the `state` map and
/// the `response` value, e.g.
/// `{"headers": {...}, "state": {"headers": {...}}, "response": {...}}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestProperty {
    /// UI/execution state, keyed by the same routes as the request fields
    #[serde(default)]
    pub state: BTreeMap<String, Value>,
    /// Most recent response payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    /// Route-scoped request fields (headers, body, params, ...)
    #[serde(flatten)]
    pub routes: BTreeMap<String, Value>,
}

impl RequestProperty {
    /// Whether `route` is reserved for a nested sub-document.
    pub fn is_reserved_route(route: &str) -> bool {
        RESERVED_ROUTES.contains(&route)
    }

    /// Request field stored under `route`.
    pub fn route(&self, route: &str) -> Option<&Value> {
        self.routes.get(route)
    }

    /// State value stored under `route`.
    pub fn route_state(&self, route: &str) -> Option<&Value> {
        self.state.get(route)
    }
}
