use std::any::type_name;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

use crate::kernel::component::ServiceContainer;
use crate::kernel::error::Result;
use crate::provider_system::dependency::{DependencyError, ProviderDependency};
use crate::provider_system::error::ProviderSystemError;
use crate::provider_system::support::ProviderSupport;
use crate::provider_system::traits::ServiceProvider;
use crate::storage::config::ConfigData;

/// A provider together with the name it was registered under.
pub struct RegisteredProvider {
    name: String,
    provider: Box<dyn ServiceProvider>,
}

impl RegisteredProvider {
    /// The provider's name: the explicit registration name, or the concrete
    /// type's identifier. Fixed for the lifetime of the registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dependencies(&self) -> Vec<ProviderDependency> {
        self.provider.dependencies()
    }

    pub fn provider(&self) -> &dyn ServiceProvider {
        self.provider.as_ref()
    }
}

impl fmt::Debug for RegisteredProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredProvider")
            .field("name", &self.name)
            .field("dependencies", &self.provider.dependencies())
            .finish()
    }
}

/// Registry of service providers.
///
/// Keeps providers in registration order, resolves the order they boot in
/// and makes sure each one boots exactly once.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<RegisteredProvider>,
    // name -> position in `providers`
    index: HashMap<String, usize>,
    booted: HashSet<String>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            index: HashMap::new(),
            booted: HashSet::new(),
        }
    }

    /// Register a provider under its concrete type's identifier.
    pub fn register<P: ServiceProvider + 'static>(&mut self, provider: P) -> Result<()> {
        self.register_boxed(type_name::<P>(), Box::new(provider))
    }

    /// Register a provider under an explicit name.
    pub fn register_named<P: ServiceProvider + 'static>(&mut self, name: &str, provider: P) -> Result<()> {
        self.register_boxed(name, Box::new(provider))
    }

    /// Register an already boxed provider under `name`.
    pub fn register_boxed(&mut self, name: &str, provider: Box<dyn ServiceProvider>) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProviderSystemError::RegistrationError {
                provider: name.to_string(),
                message: "Provider name must not be empty".to_string(),
            }
            .into());
        }
        if self.index.contains_key(name) {
            return Err(ProviderSystemError::DuplicateProvider(name.to_string()).into());
        }

        log::debug!("Registering service provider '{}'", name);
        self.index.insert(name.to_string(), self.providers.len());
        self.providers.push(RegisteredProvider {
            name: name.to_string(),
            provider,
        });
        Ok(())
    }

    pub fn has_provider(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredProvider> {
        self.index.get(name).map(|&idx| &self.providers[idx])
    }

    /// Registered providers in registration order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredProvider> {
        self.providers.iter()
    }

    /// Provider names in registration order
    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn is_booted(&self, name: &str) -> bool {
        self.booted.contains(name)
    }

    /// Whether every registered provider has booted
    pub fn all_booted(&self) -> bool {
        self.providers.iter().all(|p| self.booted.contains(&p.name))
    }

    /// Resolve the boot order: every provider after the providers it depends
    /// on, otherwise in registration order (Kahn's algorithm).
    pub fn boot_order(&self) -> std::result::Result<Vec<String>, DependencyError> {
        let count = self.providers.len();
        let mut in_degree = vec![0usize; count];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];

        for (idx, entry) in self.providers.iter().enumerate() {
            for dep in entry.provider.dependencies() {
                match self.index.get(&dep.provider_name) {
                    Some(&dep_idx) => {
                        in_degree[idx] += 1;
                        dependents[dep_idx].push(idx);
                    }
                    None if dep.required => {
                        return Err(DependencyError::MissingProvider {
                            provider: entry.name.clone(),
                            dependency: dep.provider_name,
                        });
                    }
                    None => {
                        log::debug!(
                            "Optional dependency '{}' of '{}' is not registered, skipping",
                            dep.provider_name,
                            entry.name
                        );
                    }
                }
            }
        }

        // Min-heap on registration index keeps ties in registration order
        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(idx, _)| Reverse(idx))
            .collect();
        let mut sorted = Vec::with_capacity(count);

        while let Some(Reverse(idx)) = ready.pop() {
            sorted.push(idx);
            for &dependent in &dependents[idx] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }

        if sorted.len() == count {
            Ok(sorted.into_iter().map(|idx| self.providers[idx].name.clone()).collect())
        } else {
            // Whatever never reached in-degree zero sits on or behind a cycle
            let cycle_nodes = self
                .providers
                .iter()
                .enumerate()
                .filter(|(idx, _)| in_degree[*idx] > 0)
                .map(|(_, p)| p.name.clone())
                .collect();
            Err(DependencyError::CyclicDependency(cycle_nodes))
        }
    }

    /// Boot every provider that has not booted yet, in boot order.
    ///
    /// A provider's `boot()` error stops the sequence and is returned as-is.
    /// Providers that booted before the failure stay booted and are skipped
    /// on the next call. Returns the names booted by this call.
    pub fn boot_all(&mut self, container: &mut ServiceContainer, overrides: &ConfigData) -> Result<Vec<String>> {
        let order = self.boot_order().map_err(ProviderSystemError::from)?;
        let mut newly_booted = Vec::new();

        for name in order {
            if self.booted.contains(&name) {
                continue;
            }
            let entry = &self.providers[self.index[&name]];

            log::info!("Booting service provider: {}", name);
            let mut support = ProviderSupport::new(&entry.name, container, overrides);
            if let Err(e) = entry.provider.boot(&mut support) {
                log::error!("Service provider '{}' failed to boot: {}", name, e);
                return Err(e);
            }

            self.booted.insert(name.clone());
            newly_booted.push(name);
        }

        Ok(newly_booted)
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .field("booted", &self.booted.len())
            .finish()
    }
}
