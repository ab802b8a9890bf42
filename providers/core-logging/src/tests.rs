use bootwire_core::kernel::bootstrap::{Application, ApplicationSettings};
use bootwire_core::kernel::error::Error;
use tempfile::tempdir;

use crate::{LogFormat, LoggingProvider, PROVIDER_NAME};

#[test]
fn test_log_format_parse() {
    assert_eq!(LogFormat::parse("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::parse("TEXT").unwrap(), LogFormat::Text);
    assert!(matches!(LogFormat::parse("xml"), Err(Error::Other(_))));
}

#[test]
fn test_filter_rejects_garbage_level() {
    // Only meaningful when RUST_LOG does not short-circuit the configured level
    if std::env::var("RUST_LOG").is_err() {
        assert!(LoggingProvider::filter_for("my_crate=loud").is_err());
    }
    assert!(LoggingProvider::filter_for("debug").is_ok());
}

#[test]
fn test_boot_twice_in_one_process_is_harmless() {
    for _ in 0..2 {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let mut app = Application::with_settings(ApplicationSettings::new(temp_dir.path())).unwrap();
        app.register_named_provider(PROVIDER_NAME, LoggingProvider).unwrap();
        app.boot().expect("boot should succeed even if a subscriber is already installed");
    }
}

#[test]
fn test_unknown_format_fails_boot() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(temp_dir.path().join("app.json"), r#"{"logging.format": "xml"}"#).unwrap();
    let settings = ApplicationSettings::new(temp_dir.path()).with_config_file("app.json");

    let mut app = Application::with_settings(settings).unwrap();
    app.register_named_provider(PROVIDER_NAME, LoggingProvider).unwrap();
    assert!(matches!(app.boot(), Err(Error::Other(_))));
}
