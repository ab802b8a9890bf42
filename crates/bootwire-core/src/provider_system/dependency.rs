use std::any::type_name;
use std::fmt;
use serde::Serialize;
use thiserror::Error;

/// A service provider's dependency on another provider, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderDependency {
    /// Name the other provider was registered under
    pub provider_name: String,

    /// Whether booting fails when the other provider is absent
    pub required: bool,
}

/// Error that can occur when resolving the boot order
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DependencyError {
    /// A required provider was not registered
    #[error("Service provider '{provider}' requires '{dependency}', which is not registered")]
    MissingProvider {
        provider: String,
        dependency: String,
    },

    /// Dependency cycle detected
    #[error("Circular dependency detected between providers: {}", .0.join(", "))]
    CyclicDependency(Vec<String>),
}

impl ProviderDependency {
    /// A required dependency on the provider registered as `provider_name`
    pub fn required(provider_name: &str) -> Self {
        Self {
            provider_name: provider_name.to_string(),
            required: true,
        }
    }

    /// An optional dependency: ordered before this provider when present
    pub fn optional(provider_name: &str) -> Self {
        Self {
            provider_name: provider_name.to_string(),
            required: false,
        }
    }

    /// A required dependency on provider type `P` registered under its default name.
    pub fn on<P: ?Sized>() -> Self {
        Self::required(type_name::<P>())
    }
}

impl fmt::Display for ProviderDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let requirement_type = if self.required { "requires" } else { "optional" };
        write!(f, "{} ({})", self.provider_name, requirement_type)
    }
}
