use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

use crate::console::CommandCollection;
use crate::kernel::component::{KernelComponent, ServiceContainer};
use crate::kernel::constants;
use crate::kernel::error::{Error, KernelLifecyclePhase, Result};
use crate::provider_system::{ProviderRegistry, ServiceProvider};
use crate::storage::{ConfigData, ConfigLoader, LocalStorageProvider, StorageProvider};

/// Where the application reads its own configuration from.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationSettings {
    /// Relative config paths (application and provider files) resolve against this
    pub base_path: PathBuf,
    /// Application config files, merged in order. They override provider defaults.
    pub config_files: Vec<PathBuf>,
}

impl ApplicationSettings {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            config_files: Vec::new(),
        }
    }

    /// Append an application config file
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_files.push(path.into());
        self
    }
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self::new(constants::DEFAULT_BASE_DIR)
    }
}

/// Main application struct: owns the service container and drives bootstrap.
///
/// Bootstrap is linear: construct (binds the shared collaborators), register
/// providers, [`boot`](Application::boot) them once, then optionally
/// [`run`](Application::run) the lifecycle of kernel components providers bound.
pub struct Application {
    settings: ApplicationSettings,
    container: ServiceContainer,
    providers: ProviderRegistry,
    // Application-level config; merged last whenever a provider loads files
    overrides: ConfigData,
    booted: bool,
    has_run: bool,
    running: bool,
}

impl Application {
    /// Creates an application rooted at the current directory with no config files.
    pub fn new() -> Result<Self> {
        Self::with_settings(ApplicationSettings::default())
    }

    /// Creates an application, loading its config files and binding the
    /// configuration, config loader, storage provider and command collection.
    pub fn with_settings(settings: ApplicationSettings) -> Result<Self> {
        log::info!("Initializing {} v{}", constants::APP_NAME, constants::APP_VERSION);

        let storage = Arc::new(LocalStorageProvider::new(settings.base_path.clone()));
        log::info!("Using base directory: {}", storage.base_path().display());
        let loader = ConfigLoader::new(storage.clone() as Arc<dyn StorageProvider>);

        let overrides = loader.create_from_files(&settings.config_files)?;
        log::info!(
            "Loaded {} application config file(s), {} key(s)",
            settings.config_files.len(),
            overrides.len()
        );

        let mut container = ServiceContainer::new();
        container.register_instance(storage);
        container.register_instance(Arc::new(loader));
        // The active configuration starts out as the application's own
        container.register_instance(Arc::new(overrides.clone()));
        container.register_instance(Arc::new(CommandCollection::new()));

        Ok(Application {
            settings,
            container,
            providers: ProviderRegistry::new(),
            overrides,
            booted: false,
            has_run: false,
            running: false,
        })
    }

    /// Register a provider under its concrete type's identifier.
    pub fn register_provider<P: ServiceProvider + 'static>(&mut self, provider: P) -> Result<()> {
        self.ensure_not_booted()?;
        self.providers.register(provider)
    }

    /// Register a provider under an explicit name.
    pub fn register_named_provider<P: ServiceProvider + 'static>(&mut self, name: &str, provider: P) -> Result<()> {
        self.ensure_not_booted()?;
        self.providers.register_named(name, provider)
    }

    fn ensure_not_booted(&self) -> Result<()> {
        if self.booted {
            return Err(Error::lifecycle(
                KernelLifecyclePhase::Bootstrap,
                "Cannot register service providers after the application has booted",
            ));
        }
        Ok(())
    }

    /// Boot every registered provider exactly once, dependencies first.
    ///
    /// Errors returned by a provider's `boot()` come back unchanged. After a
    /// failure `boot` may be called again; providers that already booted are
    /// skipped. Calling it after a successful boot is an error.
    pub fn boot(&mut self) -> Result<()> {
        if self.booted {
            return Err(Error::lifecycle(KernelLifecyclePhase::Boot, "Application already booted"));
        }

        log::info!("Booting {} service provider(s)...", self.providers.len());
        let booted = self.providers.boot_all(&mut self.container, &self.overrides)?;
        self.booted = true;
        log::info!("Service provider boot complete ({} booted).", booted.len());
        Ok(())
    }

    /// Boots if needed, then initializes and starts every kernel component in
    /// registration order and shuts them down in reverse.
    pub async fn run(&mut self) -> Result<()> {
        if self.has_run {
            return Err(Error::lifecycle(KernelLifecyclePhase::RunPreCheck, "Application already ran"));
        }
        if !self.booted {
            self.boot()?;
        }
        self.has_run = true;

        self.initialize().await?;
        self.start().await?;
        self.running = true;
        log::info!("Application initialized and started successfully.");

        let result = self.shutdown().await;
        self.running = false;
        result
    }

    /// Initialize all kernel components in registration order; on failure stop
    /// the ones already initialized.
    async fn initialize(&self) -> Result<()> {
        log::info!("Initializing components...");
        let components = self.container.get_all_components();
        for (position, component) in components.iter().enumerate() {
            log::info!("Initializing component: {}", component.name());
            if let Err(e) = component.initialize().await {
                log::error!("Error initializing component {}: {}", component.name(), e);
                stop_in_reverse(&components[..position]).await;
                return Err(Error::KernelLifecycleError {
                    phase: KernelLifecyclePhase::Initialize,
                    component_name: Some(component.name().to_string()),
                    message: "Component failed to initialize".to_string(),
                    source: Some(Box::new(e)),
                });
            }
        }
        log::info!("Component initialization complete.");
        Ok(())
    }

    /// Start all initialized components; on failure stop the ones already started.
    async fn start(&self) -> Result<()> {
        log::info!("Starting components...");
        let components = self.container.get_all_components();
        for (position, component) in components.iter().enumerate() {
            log::info!("Starting component: {}", component.name());
            if let Err(e) = component.start().await {
                log::error!("Error starting component {}: {}", component.name(), e);
                stop_in_reverse(&components[..position]).await;
                return Err(Error::KernelLifecycleError {
                    phase: KernelLifecyclePhase::Start,
                    component_name: Some(component.name().to_string()),
                    message: "Component failed to start".to_string(),
                    source: Some(Box::new(e)),
                });
            }
        }
        log::info!("Component start complete.");
        Ok(())
    }

    /// Shutdown all components in reverse order of initialization.
    async fn shutdown(&self) -> Result<()> {
        log::info!("Shutting down components...");
        for component in self.container.get_all_components().iter().rev() {
            log::info!("Stopping component: {}", component.name());
            if let Err(e) = component.stop().await {
                log::error!("Error stopping component {}: {}", component.name(), e);
                // Propagate the first error encountered during shutdown
                return Err(Error::KernelLifecycleError {
                    phase: KernelLifecyclePhase::Shutdown,
                    component_name: Some(component.name().to_string()),
                    message: "Component failed to stop".to_string(),
                    source: Some(Box::new(e)),
                });
            }
        }
        log::info!("Component shutdown complete.");
        Ok(())
    }

    /// Gets an instance bound in the container by its concrete type.
    pub fn get_component<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.container.get_concrete::<T>()
    }

    /// The active configuration
    pub fn config(&self) -> Result<Arc<ConfigData>> {
        self.container.resolve::<ConfigData>()
    }

    /// The shared console command collection
    pub fn commands(&self) -> Result<Arc<CommandCollection>> {
        self.container.resolve::<CommandCollection>()
    }

    /// Configuration loaded from the application's own config files
    pub fn overrides(&self) -> &ConfigData {
        &self.overrides
    }

    pub fn container(&self) -> &ServiceContainer {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut ServiceContainer {
        &mut self.container
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    pub fn settings(&self) -> &ApplicationSettings {
        &self.settings
    }

    /// Returns whether the providers have booted.
    pub fn is_booted(&self) -> bool {
        self.booted
    }

    /// True between a successful start and the end of shutdown.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("settings", &self.settings)
            .field("providers", &self.providers)
            .field("booted", &self.booted)
            .field("running", &self.running)
            .finish()
    }
}

async fn stop_in_reverse(started: &[Arc<dyn KernelComponent>]) {
    for component in started.iter().rev() {
        if let Err(e) = component.stop().await {
            log::warn!("Error stopping component {} after failed startup: {}", component.name(), e);
        }
    }
}
