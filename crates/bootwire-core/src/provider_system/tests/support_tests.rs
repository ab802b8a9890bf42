use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

use crate::console::CommandCollection;
use crate::kernel::component::ServiceContainer;
use crate::kernel::error::{Error, Result};
use crate::provider_system::support::ProviderSupport;
use crate::storage::{ConfigData, ConfigLoader, LocalStorageProvider, StorageProvider, StorageSystemError};

/// Container bound the way the kernel binds it, rooted in a temp dir.
fn setup(initial: ConfigData) -> (ServiceContainer, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let storage = Arc::new(LocalStorageProvider::new(temp_dir.path().to_path_buf())) as Arc<dyn StorageProvider>;

    let mut container = ServiceContainer::new();
    container.register_instance(Arc::new(ConfigLoader::new(storage)));
    container.register_instance(Arc::new(initial));
    container.register_instance(Arc::new(CommandCollection::new()));
    (container, temp_dir)
}

fn write(root: &Path, name: &str, contents: &str) {
    fs::write(root.join(name), contents).expect("Failed to write fixture");
}

#[test]
fn test_load_config_from_files_merges_in_call_order() -> Result<()> {
    let (mut container, temp_dir) = setup(ConfigData::new());
    write(temp_dir.path(), "a.json", r#"{"shared": "a", "only_a": 1}"#);
    write(temp_dir.path(), "b.json", r#"{"shared": "b", "only_b": 2}"#);

    let overrides = ConfigData::new();
    let mut support = ProviderSupport::new("demo", &mut container, &overrides);
    support.load_config_from_files(&["a.json", "b.json"])?;

    let config = support.config()?;
    assert_eq!(config.get::<String>("shared").unwrap(), "b");
    assert_eq!(config.get::<i32>("only_a"), Some(1));
    assert_eq!(config.get::<i32>("only_b"), Some(2));
    Ok(())
}

#[test]
fn test_load_config_keeps_existing_keys_and_overrides_win() -> Result<()> {
    let mut initial = ConfigData::new();
    initial.set("app.name", "demo")?;
    initial.set("cache.driver", "file")?;
    let (mut container, temp_dir) = setup(initial);
    write(temp_dir.path(), "cache.json", r#"{"cache.driver": "memory", "cache.ttl": 60}"#);

    let mut overrides = ConfigData::new();
    overrides.set("cache.ttl", 5)?;

    let mut support = ProviderSupport::new("cache", &mut container, &overrides);
    support.load_config_from_files(&["cache.json"])?;

    let config = container.resolve::<ConfigData>()?;
    assert_eq!(config.get::<String>("app.name").unwrap(), "demo");
    assert_eq!(config.get::<String>("cache.driver").unwrap(), "memory");
    // Application-level value beats the provider's default
    assert_eq!(config.get::<i32>("cache.ttl"), Some(5));
    Ok(())
}

#[test]
fn test_load_config_replaces_container_binding() -> Result<()> {
    let (mut container, temp_dir) = setup(ConfigData::new());
    write(temp_dir.path(), "one.json", r#"{"k": 1}"#);
    let before = container.resolve::<ConfigData>()?;

    let overrides = ConfigData::new();
    ProviderSupport::new("p", &mut container, &overrides).load_config_from_files(&["one.json"])?;

    let after = container.resolve::<ConfigData>()?;
    assert!(!Arc::ptr_eq(&before, &after));
    assert!(before.is_empty(), "Previously resolved config is not mutated");
    assert_eq!(after.get::<i32>("k"), Some(1));
    Ok(())
}

#[test]
fn test_load_config_failure_leaves_config_untouched() -> Result<()> {
    let mut initial = ConfigData::new();
    initial.set("keep", true)?;
    let (mut container, temp_dir) = setup(initial.clone());
    write(temp_dir.path(), "good.json", r#"{"keep": false}"#);

    let overrides = ConfigData::new();
    let result = ProviderSupport::new("p", &mut container, &overrides)
        .load_config_from_files(&["good.json", "missing.json"]);

    assert!(matches!(result, Err(Error::StorageSystem(StorageSystemError::FileNotFound(_)))));
    assert_eq!(*container.resolve::<ConfigData>()?, initial);
    Ok(())
}

#[test]
fn test_load_config_without_loader_fails() {
    let mut container = ServiceContainer::new();
    container.register_instance(Arc::new(ConfigData::new()));
    let overrides = ConfigData::new();

    let result = ProviderSupport::new("p", &mut container, &overrides).load_config_from_files(&["x.json"]);
    assert!(matches!(result, Err(Error::ComponentRegistryError { .. })));
}

#[test]
fn test_provide_commands_appends_in_order() -> Result<()> {
    let (mut container, _temp_dir) = setup(ConfigData::new());
    let overrides = ConfigData::new();

    let support = ProviderSupport::new("console", &mut container, &overrides);
    support.provide_commands(&["X", "Y"])?;
    support.provide_commands(&["X"])?;

    let commands = container.resolve::<CommandCollection>()?;
    assert_eq!(commands.identifiers(), vec!["X", "Y", "X"]);
    assert!(commands.entries().iter().all(|e| e.provider.as_deref() == Some("console")));
    Ok(())
}

#[test]
fn test_provide_commands_without_collection_fails() {
    let mut container = ServiceContainer::new();
    let overrides = ConfigData::new();
    let support = ProviderSupport::new("p", &mut container, &overrides);
    assert!(matches!(
        support.provide_commands(&["X"]),
        Err(Error::ComponentRegistryError { .. })
    ));
}
