//! # Bootwire Provider System
//!
//! Service providers are the units an application is assembled from. Each
//! one declares the providers it depends on and does its registration work
//! in `boot()`: binding services into the container, merging its default
//! configuration and registering console commands.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`traits`]**: the [`ServiceProvider`] trait.
//! - **[`support`]**: [`ProviderSupport`], handed to `boot()`, with
//!   `load_config_from_files` and `provide_commands`.
//! - **[`registry`]**: [`ProviderRegistry`], which fixes provider names,
//!   orders providers by their dependencies and boots each one once.
//! - **[`dependency`]**: [`ProviderDependency`] and resolution errors.
//! - **[`error`]**: [`ProviderSystemError`](error::ProviderSystemError).
pub mod dependency;
pub mod error;
pub mod registry;
pub mod support;
pub mod traits;

pub use dependency::{DependencyError, ProviderDependency};
pub use registry::{ProviderRegistry, RegisteredProvider};
pub use support::ProviderSupport;
pub use traits::ServiceProvider;
// Test module declaration
#[cfg(test)]
mod tests;
