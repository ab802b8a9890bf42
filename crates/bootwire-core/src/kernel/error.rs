//! # Bootwire Kernel Errors
//!
//! Defines the error type shared by the kernel and everything it drives.
//!
//! [`Error`] wraps the typed errors of each subsystem (service providers,
//! storage/configuration) and adds the kernel's own failures: lifecycle
//! errors tagged with the [`KernelLifecyclePhase`] they happened in, and
//! container lookups that found nothing.
use std::path::PathBuf;
use std::result::Result as StdResult;

use crate::provider_system::error::ProviderSystemError;
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

/// Kernel error type
#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed service provider error
    #[error("Provider system error: {0}")]
    ProviderSystem(#[from] ProviderSystemError),

    /// Specific, typed storage system error (includes configuration I/O)
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Error occurring during a specific kernel lifecycle phase.
    #[error("Kernel lifecycle error during {phase:?}: {message}")]
    KernelLifecycleError {
        phase: KernelLifecyclePhase,
        component_name: Option<String>,
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Error related to ServiceContainer operations or lookup failures.
    #[error("Component registry error during operation '{operation}': {message}")]
    ComponentRegistryError {
        operation: String, // e.g. "Resolve"
        type_name: Option<String>,
        message: String,
    },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Represents a specific phase in the kernel's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum KernelLifecyclePhase {
    #[error("Bootstrap")]
    Bootstrap,
    #[error("Boot")]
    Boot,
    #[error("Initialize")]
    Initialize,
    #[error("Start")]
    Start,
    #[error("RunPreCheck")]
    RunPreCheck,
    #[error("Shutdown")]
    Shutdown,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl Error {
    /// Wraps an I/O failure with the operation and path it happened on.
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        Error::StorageSystem(StorageSystemError::io(source, operation, path))
    }

    /// Lifecycle error without an underlying cause.
    pub fn lifecycle(phase: KernelLifecyclePhase, message: impl Into<String>) -> Self {
        Error::KernelLifecycleError {
            phase,
            component_name: None,
            message: message.into(),
            source: None,
        }
    }
}
