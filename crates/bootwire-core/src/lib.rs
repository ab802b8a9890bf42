pub mod console;
pub mod kernel;
pub mod provider_system;
pub mod storage;

// Re-export key public types/traits for easier use by the binary and providers
pub use kernel::{Application, ApplicationSettings};
pub use kernel::error::Error as KernelError;
pub use kernel::component::{KernelComponent, ServiceContainer};
pub use provider_system::{ProviderDependency, ProviderRegistry, ProviderSupport, ServiceProvider};
pub use console::CommandCollection;
pub use storage::{ConfigBuilder, ConfigData, ConfigLoader, StorageProvider};

#[cfg(test)]
mod tests;
