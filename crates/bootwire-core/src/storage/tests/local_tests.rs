use std::path::PathBuf;
use tempfile::tempdir;

use crate::kernel::error::{Error, Result};
use crate::storage::error::StorageSystemError;
use crate::storage::local::LocalStorageProvider;
use crate::storage::provider::StorageProvider;

// Helper function to create PathBuf from str for tests
fn p(s: &str) -> PathBuf {
    PathBuf::from(s)
}

#[test]
fn test_write_and_read_string() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    // Parent directories are created on demand
    let path = p("nested/dir/settings.json");
    provider.write_string(&path, "{\"a\": 1}")?;

    assert!(temp_dir.path().join("nested/dir/settings.json").is_file());
    assert_eq!(provider.read_to_string(&path)?, "{\"a\": 1}");

    // Overwrite replaces the content and leaves no staging file behind
    provider.write_string(&path, "{}")?;
    assert_eq!(provider.read_to_string(&path)?, "{}");
    let leftovers = std::fs::read_dir(temp_dir.path().join("nested/dir"))
        .expect("list dir")
        .count();
    assert_eq!(leftovers, 1);

    Ok(())
}

#[test]
fn test_read_missing_file_reports_not_found() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    match provider.read_to_string(&p("missing.toml")) {
        Err(Error::StorageSystem(StorageSystemError::FileNotFound(path))) => {
            assert_eq!(path, temp_dir.path().join("missing.toml"));
        }
        other => panic!("Expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_directory_is_not_a_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    std::fs::create_dir(temp_dir.path().join("config.json")).expect("create dir");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    assert!(matches!(
        provider.read_to_string(&p("config.json")),
        Err(Error::StorageSystem(StorageSystemError::FileNotFound(_)))
    ));
}

#[test]
fn test_absolute_paths_bypass_base() -> Result<()> {
    let base_dir = tempdir().expect("Failed to create temp directory");
    let other_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(base_dir.path().to_path_buf());

    let absolute = other_dir.path().join("outside.json");
    std::fs::write(&absolute, "{}").expect("write fixture");

    assert_eq!(provider.read_to_string(&absolute)?, "{}");
    assert_eq!(provider.resolve_path(&absolute), absolute);
    Ok(())
}
