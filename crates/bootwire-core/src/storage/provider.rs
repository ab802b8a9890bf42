use std::fmt::Debug;
use std::path::Path;
use crate::kernel::error::Result;

/// Where [`ConfigLoader`](crate::storage::ConfigLoader) reads and writes config files.
pub trait StorageProvider: Send + Sync + Debug {
    /// Full contents of a config file; a missing file is `StorageSystemError::FileNotFound`
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace a config file's contents, creating parent directories as needed
    fn write_string(&self, path: &Path, contents: &str) -> Result<()>;
}
