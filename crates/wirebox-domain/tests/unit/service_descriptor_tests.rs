//! Unit tests for service descriptors

use serde_json::json;
use wirebox_domain::{CallDescriptor, Error, ServiceDescriptor, Value};

fn descriptor(raw: serde_json::Value) -> wirebox_domain::Result<ServiceDescriptor> {
    ServiceDescriptor::from_value(&Value::from(raw))
}

#[test]
fn test_new_defaults() {
    let service = ServiceDescriptor::new("app.mail.Mailer", vec![]).expect("valid class");

    assert_eq!(service.class_identifier(), "app.mail.Mailer");
    assert!(service.constructor_arguments().is_empty());
    assert_eq!(service.alias(), None);
    assert!(service.properties().is_empty());
    assert!(service.calls().is_empty());
    assert!(service.listeners().is_empty());
    assert!(service.is_public());
}

#[test]
fn test_new_rejects_empty_class() {
    assert!(matches!(
        ServiceDescriptor::new("", vec![]),
        Err(Error::ServiceSyntax { .. })
    ));
}

#[test]
fn test_chaining_setters() {
    let service = ServiceDescriptor::new("app.mail.Mailer", vec![Value::from(1)])
        .expect("valid class")
        .set_alias("mailer")
        .expect("valid alias")
        .set_property("retries", 3)
        .add_call("set", vec![Value::from("foo"), Value::from(1)])
        .expect("valid call")
        .with_call(CallDescriptor::new("flush", vec![]).expect("valid call"))
        .add_listener("app.run", "someMethod", vec![])
        .expect("valid listener")
        .with_listener(
            "app.run",
            CallDescriptor::new("someMethod2", vec![1.into(), 2.into(), 3.into()])
                .expect("valid call"),
        )
        .set_public(false);

    assert_eq!(service.alias(), Some("mailer"));
    assert_eq!(service.properties().get("retries"), Some(&Value::from(3)));
    let calls: Vec<_> = service.calls().iter().map(CallDescriptor::method_name).collect();
    assert_eq!(calls, ["set", "flush"]);
    let run = &service.listeners()["app.run"];
    assert_eq!(run[0].method_name(), "someMethod");
    assert_eq!(
        run[1].arguments(),
        &[Value::from(1), Value::from(2), Value::from(3)]
    );
    assert!(!service.is_public());
}

#[test]
fn test_empty_alias_is_rejected() {
    let service = ServiceDescriptor::new("app.mail.Mailer", vec![]).expect("valid class");
    assert!(matches!(
        service.set_alias(""),
        Err(Error::AliasInvalidType { .. })
    ));
    assert!(matches!(
        descriptor(json!({ "class": "app.mail.Mailer", "alias": "" })),
        Err(Error::AliasInvalidType { .. })
    ));
}

#[test]
fn test_from_value_keeps_listener_event_order() {
    let service = descriptor(json!({
        "class": "app.mail.Mailer",
        "listeners": {
            "app.stop": [["flush", []]],
            "app.boot": [["connect", []]]
        }
    }))
    .expect("valid definition");

    let events: Vec<&str> = service.listeners().keys().map(String::as_str).collect();
    assert_eq!(events, vec!["app.stop", "app.boot"]);
}

#[test]
fn test_from_value_requires_class() {
    assert!(matches!(descriptor(json!({})), Err(Error::ServiceSyntax { .. })));
    assert!(matches!(
        descriptor(json!({ "class": "" })),
        Err(Error::ServiceSyntax { .. })
    ));
}

#[test]
fn test_from_value_rejects_non_map() {
    for raw in [json!(""), json!(0), json!(null), json!([])] {
        assert!(
            matches!(descriptor(raw.clone()), Err(Error::ServiceInvalidType { .. })),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn test_from_value_service_invalid_types() {
    let cases = [
        json!({ "className": null }),
        json!({ "className": "app.A", "calls": null }),
        json!({ "className": "app.A", "calls": ["set"] }),
        json!({ "className": "app.A", "calls": [[1, []]] }),
        json!({ "className": "app.A", "arguments": "x" }),
        json!({ "className": "app.A", "properties": [] }),
    ];
    for raw in cases {
        assert!(
            matches!(descriptor(raw.clone()), Err(Error::ServiceInvalidType { .. })),
            "{raw} should be a ServiceInvalidType"
        );
    }
}

#[test]
fn test_from_value_short_call_is_syntax_error() {
    assert!(matches!(
        descriptor(json!({ "className": "app.A", "calls": [["set"]] })),
        Err(Error::ServiceSyntax { .. })
    ));
}

#[test]
fn test_from_value_listener_errors() {
    assert!(matches!(
        descriptor(json!({ "className": "app.A", "listeners": null })),
        Err(Error::ListenerInvalidType { .. })
    ));
    assert!(matches!(
        descriptor(json!({ "className": "app.A", "listeners": { "someEvent": null } })),
        Err(Error::ListenerInvalidType { .. })
    ));
    assert!(matches!(
        descriptor(json!({ "className": "app.A", "listeners": { "someEvent": [["someMethod"]] } })),
        Err(Error::ListenerSyntax { .. })
    ));
}

#[test]
fn test_from_value_alias_and_public_types() {
    assert!(matches!(
        descriptor(json!({ "class": "app.A", "alias": 1 })),
        Err(Error::AliasInvalidType { .. })
    ));
    assert!(matches!(
        descriptor(json!({ "class": "app.A", "public": "no" })),
        Err(Error::PublicInvalidType { .. })
    ));
}

#[test]
fn test_from_value_full_definition() {
    let service = descriptor(json!({
        "className": "app.mail.Mailer",
        "class": "ignored",
        "alias": "foo",
        "arguments": [123],
        "properties": { "someProperty": true },
        "calls": [["someMethod", [1, 2, 3]]],
        "listeners": { "someEvent": [["someMethod", []]] },
        "public": false
    }))
    .expect("valid definition");

    assert_eq!(service.class_identifier(), "app.mail.Mailer");
    assert_eq!(service.constructor_arguments(), &[Value::from(123)]);
    assert_eq!(
        service.properties().get("someProperty"),
        Some(&Value::from(true))
    );
    assert_eq!(
        service.calls()[0].arguments(),
        &[Value::from(1), Value::from(2), Value::from(3)]
    );
    assert_eq!(service.listeners()["someEvent"][0].method_name(), "someMethod");
    assert_eq!(service.alias(), Some("foo"));
    assert!(!service.is_public());
}

#[test]
fn test_from_value_uses_class_when_class_name_missing() {
    let service = descriptor(json!({ "class": "app.A" })).expect("valid definition");
    assert_eq!(service.class_identifier(), "app.A");
}
