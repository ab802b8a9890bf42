//! Text rendering for the inspection commands.
use bootwire_core::console::CommandEntry;
use bootwire_core::kernel::bootstrap::Application;
use bootwire_core::kernel::error::{Error, Result};
use bootwire_core::provider_system::error::ProviderSystemError;
use bootwire_core::storage::{ConfigData, ConfigFormat};

/// Providers in boot order, each with its declared dependencies.
pub fn render_providers(app: &Application) -> Result<String> {
    let registry = app.providers();
    if registry.is_empty() {
        return Ok("No service providers registered.\n".to_string());
    }

    let order = registry.boot_order().map_err(ProviderSystemError::from)?;
    let mut out = String::from("Service providers (boot order):\n");
    for (position, name) in order.iter().enumerate() {
        let status = if registry.is_booted(name) { "booted" } else { "pending" };
        out.push_str(&format!("  {}. {} [{}]\n", position + 1, name, status));
        if let Some(entry) = registry.get(name) {
            for dep in entry.dependencies() {
                out.push_str(&format!("       {}\n", dep));
            }
        }
    }
    Ok(out)
}

/// Registered console commands with the provider each came from.
pub fn render_commands(entries: &[CommandEntry]) -> String {
    if entries.is_empty() {
        return "No console commands registered.\n".to_string();
    }
    let mut out = String::from("Console commands:\n");
    for entry in entries {
        out.push_str(&format!("  - {}\n", entry));
    }
    out
}

/// The whole configuration in the requested format.
pub fn render_config(config: &ConfigData, format_name: &str) -> Result<String> {
    let format = ConfigFormat::from_name(format_name)
        .ok_or_else(|| Error::Other(format!("Unsupported output format '{}'", format_name)))?;
    let mut rendered = config.serialize(format)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

/// A single configuration value as JSON.
pub fn render_value(config: &ConfigData, key: &str) -> Result<String> {
    match config.get_value(key) {
        Some(value) => Ok(format!("{}\n", value)),
        None => Err(Error::Other(format!("Config key '{}' is not set", key))),
    }
}
