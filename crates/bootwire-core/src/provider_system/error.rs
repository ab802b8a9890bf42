//! # Bootwire Provider System Errors
//!
//! [`ProviderSystemError`] covers registering service providers and working
//! out the order they boot in. Errors raised by a provider's own `boot()` are
//! not wrapped here; they reach the caller unchanged.
use crate::provider_system::dependency::DependencyError;

#[derive(Debug, thiserror::Error)]
pub enum ProviderSystemError {
    #[error("Service provider already registered: '{0}'")]
    DuplicateProvider(String),

    #[error("Service provider registration error for '{provider}': {message}")]
    RegistrationError {
        provider: String,
        message: String,
    },

    #[error("Dependency resolution failed: {0}")]
    DependencyResolution(#[from] DependencyError),
}
