use crate::kernel::error::Result;
use crate::provider_system::dependency::ProviderDependency;
use crate::provider_system::support::ProviderSupport;

/// Core trait every service provider implements.
///
/// A provider is a bootstrap-time registration unit: the kernel boots it
/// exactly once, after every provider it depends on. The name a provider is
/// known by is fixed at registration (see
/// [`ProviderRegistry::register`](crate::provider_system::ProviderRegistry::register)),
/// not by the provider itself.
pub trait ServiceProvider: Send + Sync {
    /// Providers that must boot before this one. Defaults to none.
    fn dependencies(&self) -> Vec<ProviderDependency> {
        Vec::new()
    }

    /// Do the provider's registration work: bind services, merge config,
    /// register commands.
    fn boot(&self, support: &mut ProviderSupport<'_>) -> Result<()>;
}
