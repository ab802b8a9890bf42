//! Service provider that installs the process-wide logging subscriber.
//!
//! Reads `logging.level` (default `info`) and `logging.format` (`text` or
//! `json`) from the active configuration. A `RUST_LOG` environment variable,
//! when set, takes precedence over the configured level. Output goes to
//! stderr so stdout stays free for command output.
use bootwire_core::kernel::constants::{DEFAULT_LOG_LEVEL, LOG_LEVEL_KEY};
use bootwire_core::kernel::error::{Error as KernelError, Result as KernelResult};
use bootwire_core::provider_system::{ProviderSupport, ServiceProvider};
use tracing_subscriber::EnvFilter;

/// Configuration key selecting the output format
pub const LOG_FORMAT_KEY: &str = "logging.format";

/// Name the provider is registered under; other providers depend on it by this name
pub const PROVIDER_NAME: &str = "core-logging";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> KernelResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(KernelError::Other(format!("Unknown logging format '{}'", other))),
        }
    }
}

#[derive(Default)]
pub struct LoggingProvider;

impl LoggingProvider {
    /// Build the filter: `RUST_LOG` if present, otherwise the configured level.
    pub fn filter_for(level: &str) -> KernelResult<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(level)
            .map_err(|e| KernelError::Other(format!("Invalid log level '{}': {}", level, e)))
    }
}

impl ServiceProvider for LoggingProvider {
    fn boot(&self, support: &mut ProviderSupport<'_>) -> KernelResult<()> {
        let config = support.config()?;
        let level: String = config.get_or(LOG_LEVEL_KEY, DEFAULT_LOG_LEVEL.to_string());
        let format = LogFormat::parse(&config.get_or(LOG_FORMAT_KEY, "text".to_string()))?;
        let filter = Self::filter_for(&level)?;

        let installed = match format {
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
        match installed {
            Ok(()) => tracing::info!(level = %level, format = ?format, "Logging initialized"),
            // Another subscriber (or a previous boot in this process) owns the global slot
            Err(e) => log::warn!("Logging subscriber already installed, keeping it: {}", e),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
