use std::path::Path;
use std::sync::Arc;

use crate::console::CommandCollection;
use crate::kernel::component::ServiceContainer;
use crate::kernel::error::Result;
use crate::storage::config::{ConfigBuilder, ConfigData, ConfigLoader};

/// What a service provider gets to work with while it boots.
///
/// Wraps the service container for the duration of one provider's `boot()`
/// and offers the two convenience operations providers share: merging
/// configuration files and registering console commands.
pub struct ProviderSupport<'a> {
    provider_name: &'a str,
    container: &'a mut ServiceContainer,
    overrides: &'a ConfigData,
}

impl<'a> ProviderSupport<'a> {
    /// `overrides` is the application-level configuration; it is merged last
    /// whenever a provider loads its own config files.
    pub fn new(provider_name: &'a str, container: &'a mut ServiceContainer, overrides: &'a ConfigData) -> Self {
        Self { provider_name, container, overrides }
    }

    /// Name of the provider currently booting
    pub fn provider_name(&self) -> &str {
        self.provider_name
    }

    pub fn container(&self) -> &ServiceContainer {
        &*self.container
    }

    pub fn container_mut(&mut self) -> &mut ServiceContainer {
        &mut *self.container
    }

    /// The active configuration
    pub fn config(&self) -> Result<Arc<ConfigData>> {
        self.container.resolve::<ConfigData>()
    }

    /// Merge configuration files into the active configuration.
    ///
    /// Files merge in argument order on top of the active configuration, a key
    /// present in several files takes the last file's value, and the
    /// application overrides are applied on top of that. The result replaces
    /// the container's `ConfigData` binding. If any file fails to load, the
    /// active configuration is left as it was.
    pub fn load_config_from_files<P: AsRef<Path>>(&mut self, config_files: &[P]) -> Result<()> {
        let current = self.container.resolve::<ConfigData>()?;
        let loader = self.container.resolve::<ConfigLoader>()?;

        let mut builder = ConfigBuilder::with_base((*loader).clone(), (*current).clone());
        for config_file in config_files {
            builder.merge_file(config_file.as_ref())?;
        }
        builder.merge(self.overrides);

        let merged = builder.build();
        log::debug!(
            "Provider '{}' merged {} config file(s); {} key(s) active",
            self.provider_name,
            config_files.len(),
            merged.len()
        );
        self.container.register_instance(Arc::new(merged));
        Ok(())
    }

    /// Append console command identifiers, in argument order, to the shared
    /// command collection.
    pub fn provide_commands<S: AsRef<str>>(&self, command_ids: &[S]) -> Result<()> {
        let collection = self.container.resolve::<CommandCollection>()?;
        for command_id in command_ids {
            collection.add_from(command_id.as_ref(), self.provider_name);
        }
        Ok(())
    }
}
