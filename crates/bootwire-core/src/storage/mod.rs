//! # Bootwire Storage & Configuration
//!
//! File access behind the [`StorageProvider`] trait and the configuration model
//! built on top of it: [`ConfigData`] (flat key/value store),
//! [`ConfigLoader`] (creates `ConfigData` from files) and [`ConfigBuilder`]
//! (merges fragments in order).
pub mod provider;
pub mod local;
pub mod config;
pub mod error;

/// Re-export key types
pub use provider::StorageProvider;
pub use local::LocalStorageProvider;
pub use config::{ConfigBuilder, ConfigData, ConfigFormat, ConfigLoader};
pub use error::StorageSystemError;

// Test module declaration
#[cfg(test)]
mod tests;
