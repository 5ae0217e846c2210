//! Configuration for the reqtab tab registry.
//!
//! The registry's behaviour has two switches:
//!
//! - [`HandOffPolicy`] - when removing a tab activates one of its neighbours
//! - [`MissingTargetPolicy`] - whether a missing active tab or unknown tab id
//!   is reported as an error or silently ignored
//!
//! Both live in [`RegistryConfig`], which can be loaded from and saved to a
//! YAML file.

pub mod config;
pub mod error;
pub mod types;

pub use config::RegistryConfig;
pub use error::ConfigError;
pub use types::{HandOffPolicy, MissingTargetPolicy};
