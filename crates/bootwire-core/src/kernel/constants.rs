/// Application name
pub const APP_NAME: &str = "Bootwire";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default base directory that relative config paths resolve against
pub const DEFAULT_BASE_DIR: &str = ".";

/// Configuration key read by the logging provider
pub const LOG_LEVEL_KEY: &str = "logging.level";

/// Log level used when no configuration sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";
