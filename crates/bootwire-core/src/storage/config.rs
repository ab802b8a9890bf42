use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Serialize, Deserialize};
use serde_json;
#[cfg(feature = "yaml-config")]
use serde_yaml;
#[cfg(feature = "toml-config")]
use toml;

use crate::kernel::error::Result;
use crate::storage::error::StorageSystemError;
use crate::storage::StorageProvider;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
    }

    /// Parse a format name such as `"json"` or `"yml"`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            #[cfg(feature = "toml-config")]
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Flat key/value configuration.
///
/// Keys are top-level only; merging replaces whole values, so a key present in
/// both sides takes the value of the side merged last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigData {
    /// Raw configuration values
    #[serde(flatten)]
    values: HashMap<String, serde_json::Value>,
}

impl ConfigData {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Get a configuration value
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.values.get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Get a configuration value with default
    pub fn get_or<T: for<'de> Deserialize<'de>>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Get the raw value stored under a key
    pub fn get_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// Set a configuration value
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| StorageSystemError::SerializationError {
            format: "json".to_string(),
            source: Box::new(e),
        })?;
        self.values.insert(key.to_string(), json_value);
        Ok(())
    }

    /// Remove a configuration value
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.values.remove(key)
    }

    /// Check if key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Get all keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge with another config, overriding existing values
    pub fn merge(&mut self, other: &ConfigData) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Non-mutating merge: a copy of `self` with `other` merged on top
    pub fn merged(&self, other: &ConfigData) -> ConfigData {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// Serialize to string based on format
    pub fn serialize(&self, format: ConfigFormat) -> Result<String> {
        let rendered = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(&self)
                .map_err(|e| serialization_error("json", e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(&self)
                .map_err(|e| serialization_error("yaml", e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(&self.without_nulls())
                .map_err(|e| serialization_error("toml", e)),
        };
        Ok(rendered?)
    }

    /// Copy with every `null` dropped, including inside tables and arrays. TOML has no null.
    #[cfg(feature = "toml-config")]
    fn without_nulls(&self) -> ConfigData {
        fn strip(value: &serde_json::Value) -> Option<serde_json::Value> {
            match value {
                serde_json::Value::Null => None,
                serde_json::Value::Array(items) => Some(items.iter().filter_map(strip).collect()),
                serde_json::Value::Object(map) => Some(serde_json::Value::Object(
                    map.iter().filter_map(|(k, v)| strip(v).map(|v| (k.clone(), v))).collect(),
                )),
                other => Some(other.clone()),
            }
        }
        let values = self.values.iter()
            .filter_map(|(key, value)| strip(value).map(|v| (key.clone(), v)))
            .collect();
        ConfigData { values }
    }

    /// Deserialize from string based on format
    pub fn deserialize(data: &str, format: ConfigFormat) -> Result<Self> {
        let parsed = match format {
            ConfigFormat::Json => serde_json::from_str(data)
                .map_err(|e| deserialization_error("json", e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data)
                .map_err(|e| deserialization_error("yaml", e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data)
                .map_err(|e| deserialization_error("toml", e)),
        };
        Ok(parsed?)
    }
}

impl Default for ConfigData {
    fn default() -> Self {
        Self::new()
    }
}

fn serialization_error<E>(format: &str, source: E) -> StorageSystemError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StorageSystemError::SerializationError { format: format.to_string(), source: Box::new(source) }
}

fn deserialization_error<E>(format: &str, source: E) -> StorageSystemError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StorageSystemError::DeserializationError { format: format.to_string(), source: Box::new(source) }
}

/// Creates [`ConfigData`] from configuration files.
///
/// All reads go through the wrapped [`StorageProvider`], so relative paths
/// resolve the way the provider resolves them.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    provider: Arc<dyn StorageProvider>,
}

impl ConfigLoader {
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// The storage provider files are read through
    pub fn provider(&self) -> &Arc<dyn StorageProvider> {
        &self.provider
    }

    /// Parse a single configuration file. The format comes from the extension.
    pub fn create_from_file(&self, path: &Path) -> Result<ConfigData> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| StorageSystemError::UnsupportedConfigFormat(path.display().to_string()))?;
        let content = self.provider.read_to_string(path)?;
        log::debug!("Loaded config file {} ({} bytes)", path.display(), content.len());
        ConfigData::deserialize(&content, format)
    }

    /// Parse several files and merge them in order.
    pub fn create_from_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<ConfigData> {
        let mut builder = ConfigBuilder::new(self.clone());
        for path in paths {
            builder.merge_file(path.as_ref())?;
        }
        Ok(builder.build())
    }

    /// Render `config` into the format implied by `path` and write it.
    pub fn save_to_file(&self, path: &Path, config: &ConfigData) -> Result<()> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| StorageSystemError::UnsupportedConfigFormat(path.display().to_string()))?;
        let content = config.serialize(format)?;
        self.provider.write_string(path, &content)
    }
}

/// Accumulates configuration fragments, last one wins.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    loader: ConfigLoader,
    data: ConfigData,
}

impl ConfigBuilder {
    pub fn new(loader: ConfigLoader) -> Self {
        Self { loader, data: ConfigData::new() }
    }

    /// Start from an existing configuration instead of an empty one
    pub fn with_base(loader: ConfigLoader, base: ConfigData) -> Self {
        Self { loader, data: base }
    }

    /// Merge an in-memory fragment on top of what has been built so far
    pub fn merge(&mut self, fragment: &ConfigData) -> &mut Self {
        self.data.merge(fragment);
        self
    }

    /// Load a file and merge it on top of what has been built so far
    pub fn merge_file(&mut self, path: &Path) -> Result<&mut Self> {
        let fragment = self.loader.create_from_file(path)?;
        self.data.merge(&fragment);
        Ok(self)
    }

    /// Peek at the current state
    pub fn current(&self) -> &ConfigData {
        &self.data
    }

    pub fn build(self) -> ConfigData {
        self.data
    }
}
