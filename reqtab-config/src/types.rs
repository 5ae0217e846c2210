//! Policy enums controlling the tab registry.

use serde::{Deserialize, Serialize};

/// When `remove_tab` hands activation over to a neighbouring tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HandOffPolicy {
    /// Always activate the next (or previous) neighbour of the removed tab,
    /// even when the removed tab was not the active one.
    #[default]
    Always,
    /// Only hand off when the removed tab was the active one.
    ActiveOnly,
}

/// How operations react to a missing active tab or an unknown tab id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingTargetPolicy {
    /// Check the target before writing and report a recoverable error.
    #[default]
    Error,
    /// Skip the missing step silently.
    ///
    /// `activate_tab` with an unknown id still deactivates the current tab.
    /// Only missing targets are affected: reserved request routes are
    /// rejected under both policies.
    Ignore,
}
