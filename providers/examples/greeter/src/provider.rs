use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;

use bootwire_core::kernel::component::KernelComponent;
use bootwire_core::kernel::{Error as KernelError, Result as KernelResult};
use bootwire_core::provider_system::{ProviderDependency, ProviderSupport, ServiceProvider};

/// Console commands this provider exposes
pub const COMMANDS: [&str; 2] = ["greet", "greet:farewell"];

/// Accepted range for `greeter.repeat`
pub const MAX_REPEAT: u64 = 16;
const REPEAT_KEY: &str = "greeter.repeat";

/// Default configuration shipped with the crate
pub fn default_config_path() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/config/greeter.toml"))
}

/// Service built from configuration while the provider boots.
#[derive(Debug)]
pub struct Greeter {
    message: String,
    audience: String,
    repeat: usize,
    running: AtomicBool,
}

impl Greeter {
    pub fn greeting(&self) -> String {
        vec![format!("{}, {}!", self.message, self.audience); self.repeat].join(" ")
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KernelComponent for Greeter {
    fn name(&self) -> &'static str {
        "Greeter"
    }

    async fn initialize(&self) -> KernelResult<()> {
        Ok(())
    }

    async fn start(&self) -> KernelResult<()> {
        self.running.store(true, Ordering::SeqCst);
        log::info!("{}", self.greeting());
        Ok(())
    }

    async fn stop(&self) -> KernelResult<()> {
        self.running.store(false, Ordering::SeqCst);
        log::info!("Goodbye, {}!", self.audience);
        Ok(())
    }
}

pub struct GreeterProvider;

impl ServiceProvider for GreeterProvider {
    fn dependencies(&self) -> Vec<ProviderDependency> {
        // Logging is nice to have, not required
        vec![ProviderDependency::optional(core_logging::PROVIDER_NAME)]
    }

    fn boot(&self, support: &mut ProviderSupport<'_>) -> KernelResult<()> {
        support.load_config_from_files(&[default_config_path()])?;

        let config = support.config()?;
        let greeter = Greeter {
            message: config.get_or("greeter.message", "Hello".to_string()),
            audience: config.get_or("greeter.audience", "world".to_string()),
            repeat: repeat_from(config.get_value(REPEAT_KEY))?,
            running: AtomicBool::new(false),
        };
        support.container_mut().register_component(Arc::new(greeter));

        support.provide_commands(&COMMANDS)
    }
}

/// `greeter.repeat` must be an integer in `1..=MAX_REPEAT`; unset means once.
fn repeat_from(value: Option<&serde_json::Value>) -> KernelResult<usize> {
    let Some(value) = value else {
        return Ok(1);
    };
    value
        .as_u64()
        .filter(|n| (1..=MAX_REPEAT).contains(n))
        .map(|n| n as usize)
        .ok_or_else(|| {
            KernelError::Other(format!(
                "'{}' must be an integer between 1 and {}, got {}",
                REPEAT_KEY, MAX_REPEAT, value
            ))
        })
}

#[cfg(test)]
mod tests;
