//! Tests for logging setup

use tracing::Level;
use wirebox_domain::Error;
use wirebox_infrastructure::config::LoggingConfig;
use wirebox_infrastructure::logging::{init_logging, parse_log_level};

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").expect("trace"), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").expect("debug"), Level::DEBUG);
    assert_eq!(parse_log_level("warning").expect("warning"), Level::WARN);
    assert_eq!(parse_log_level("error").expect("error"), Level::ERROR);
}

#[test]
fn test_parse_log_level_rejects_unknown() {
    let err = parse_log_level("verbose").expect_err("unknown level");
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().contains("verbose"));
}

#[test]
fn test_init_logging_validates_level_first() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_init_logging_installs_once() {
    let config = LoggingConfig::default();
    assert!(init_logging(&config).is_ok());
    // A second global subscriber is refused.
    assert!(init_logging(&config).is_err());
}
