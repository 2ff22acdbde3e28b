//! Logging Tests

use mhs_infrastructure::config::LoggingConfig;
use mhs_infrastructure::di::LoggerFactory;
use mhs_infrastructure::logging::{init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level_variants() {
    for (input, expected) in [
        ("trace", Level::TRACE),
        ("Debug", Level::DEBUG),
        ("INFO", Level::INFO),
        ("warn", Level::WARN),
        ("error", Level::ERROR),
    ] {
        assert_eq!(parse_log_level(input).ok(), Some(expected), "{input}");
    }
}

#[test]
fn test_invalid_level_rejected_before_install() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ..LoggingConfig::default()
    };
    let error = init_logging(&config).expect_err("invalid level");
    assert!(error.is_configuration());
}

#[test]
fn test_subscriber_installed_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = LoggingConfig {
        json_format: true,
        file_output: Some(dir.path().join("host.log")),
        ..LoggingConfig::default()
    };

    // Another test may have installed a subscriber first
    let _ = init_logging(&config);
    assert!(init_logging(&config).is_err());

    LoggerFactory::new("echo")
        .create_logger("listener")
        .info("logging after install");
}
