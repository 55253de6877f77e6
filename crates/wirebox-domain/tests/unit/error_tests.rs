//! Unit tests for domain error types

use wirebox_domain::Error;

#[test]
fn test_key_reference_message() {
    let error = Error::key_reference("services.foo");
    assert_eq!(error.to_string(), "Key \"services.foo\" does not exist");
}

#[test]
fn test_alias_key_reference_is_a_key_reference() {
    let error = Error::alias_key_reference("aliases.foo", "services.bar");
    assert!(error.is_key_reference());
    assert_eq!(
        error.to_string(),
        "Key \"services.bar\" for \"aliases.foo\" does not exist"
    );
}

#[test]
fn test_method_reference_fields() {
    let error = Error::method_reference("Class \"app.Mailer\"", "send");
    match error {
        Error::MethodReference { owner, method } => {
            assert_eq!(owner, "Class \"app.Mailer\"");
            assert_eq!(method, "send");
        }
        _ => panic!("Expected MethodReference error"),
    }
}

#[test]
fn test_alias_cycle_lists_chain() {
    let error = Error::AliasCycle {
        chain: vec!["aliases.a".into(), "aliases.b".into(), "aliases.a".into()],
    };
    assert_eq!(
        error.to_string(),
        "Alias cycle detected: aliases.a -> aliases.b -> aliases.a"
    );
    assert!(!error.is_key_reference());
}

#[test]
fn test_config_error() {
    let error = Error::config("Missing required config");
    match error {
        Error::Configuration { message, source } => {
            assert_eq!(message, "Missing required config");
            assert!(source.is_none());
        }
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_json_error_from() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid JSON");
    let error: Error = json_err.into();
    assert!(matches!(error, Error::Json { .. }));
}
