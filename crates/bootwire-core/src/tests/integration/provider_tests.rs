//! End-to-end bootstrap: providers that depend on each other, layer config
//! files over application settings and register commands and services.
use std::fs;
use std::sync::Arc;
use async_trait::async_trait;
use tempfile::tempdir;

use crate::kernel::bootstrap::{Application, ApplicationSettings};
use crate::kernel::component::KernelComponent;
use crate::kernel::error::Result;
use crate::provider_system::{ProviderDependency, ProviderSupport, ServiceProvider};

#[derive(Debug)]
struct Database {
    url: String,
}

#[async_trait]
impl KernelComponent for Database {
    fn name(&self) -> &'static str { "Database" }
    async fn initialize(&self) -> Result<()> { Ok(()) }
    async fn start(&self) -> Result<()> { Ok(()) }
    async fn stop(&self) -> Result<()> { Ok(()) }
}

struct DatabaseProvider;

impl ServiceProvider for DatabaseProvider {
    fn boot(&self, support: &mut ProviderSupport<'_>) -> Result<()> {
        support.load_config_from_files(&["config/database.json"])?;
        let url = support.config()?.get_or("database.url", "sqlite::memory:".to_string());
        support.container_mut().register_component(Arc::new(Database { url }));
        support.provide_commands(&["db:migrate", "db:seed"])
    }
}

struct CacheProvider;

impl ServiceProvider for CacheProvider {
    fn dependencies(&self) -> Vec<ProviderDependency> {
        vec![ProviderDependency::on::<DatabaseProvider>()]
    }

    fn boot(&self, support: &mut ProviderSupport<'_>) -> Result<()> {
        // Depends on the database being bound already
        support.container().resolve::<Database>()?;
        support.load_config_from_files(&["config/cache.toml"])?;
        support.provide_commands(&["cache:clear"])
    }
}

#[tokio::test]
async fn test_full_bootstrap() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let root = temp_dir.path();
    fs::create_dir_all(root.join("config")).unwrap();
    fs::write(root.join("config/database.json"), r#"{"database.url": "postgres://default", "database.pool": 5}"#).unwrap();
    fs::write(root.join("config/cache.toml"), "\"cache.ttl\" = 60\n\"database.pool\" = 10\n").unwrap();
    fs::write(root.join("app.json"), r#"{"database.url": "postgres://prod"}"#).unwrap();

    let settings = ApplicationSettings::new(root).with_config_file("app.json");
    let mut app = Application::with_settings(settings).expect("Application::with_settings failed");

    // Registered dependent-first on purpose
    app.register_named_provider("cache", CacheProvider).unwrap();
    app.register_provider(DatabaseProvider).unwrap();
    assert_eq!(
        app.providers().boot_order().unwrap(),
        vec![std::any::type_name::<DatabaseProvider>().to_string(), "cache".to_string()]
    );

    app.run().await.expect("run should succeed");

    let config = app.config().unwrap();
    assert_eq!(config.get::<String>("database.url").unwrap(), "postgres://prod");
    assert_eq!(config.get::<u32>("database.pool"), Some(10));
    assert_eq!(config.get::<u32>("cache.ttl"), Some(60));

    let database = app.get_component::<Database>().expect("Database should be bound");
    assert_eq!(database.url, "postgres://prod");

    assert_eq!(app.commands().unwrap().identifiers(), vec!["db:migrate", "db:seed", "cache:clear"]);
}
