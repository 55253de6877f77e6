//! Tests for service construction

use std::sync::Arc;
use std::thread;

use serde_json::json;
use wirebox_application::Container;
use wirebox_domain::{Error, ServiceDescriptor, ServiceRef, Value};

use crate::fixtures::{FIXTURE_CLASS, Fixture, container, fixture};

#[test]
fn test_service_is_constructed_once() {
    let container = container();
    container
        .set("services.fixture", json!({"class": FIXTURE_CLASS}))
        .expect("set");

    let first = container.get("services.fixture").expect("first");
    let second = container.get("services.fixture").expect("second");
    assert_eq!(first, second);
    assert!(first.as_object().is_some_and(|s| s.is::<Fixture>()));
    assert_eq!(
        first.as_object().map(ServiceRef::class),
        Some(FIXTURE_CLASS)
    );
}

#[test]
fn test_arguments_properties_and_calls_are_interpolated() {
    let container = container();
    container
        .prepare(json!({
            "parameters.port": 8080,
            "parameters.name": "mailer",
            "services.fixture": {
                "className": FIXTURE_CLASS,
                "arguments": ["%parameters.port%", "name=%parameters.name%", {"nested": "%parameters.name%"}],
                "properties": {"label": "%parameters.name%"},
                "calls": [
                    ["set", ["port", "%parameters.port%"]],
                    ["touch", []]
                ]
            }
        }))
        .expect("prepare");

    fixture(&container, "services.fixture", |f| {
        assert_eq!(
            f.arguments,
            vec![
                Value::from(8080),
                Value::from("name=mailer"),
                Value::from(json!({"nested": "mailer"})),
            ]
        );
        assert_eq!(f.properties.get("label"), Some(&Value::from("mailer")));
        assert_eq!(f.values.get("port"), Some(&Value::from(8080)));
        let methods: Vec<&str> = f.calls.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(methods, vec!["set", "touch"]);
    });
}

#[test]
fn test_class_name_wins_over_class() {
    let container = container();
    container
        .set(
            "services.fixture",
            json!({"className": FIXTURE_CLASS, "class": "test.Unknown"}),
        )
        .expect("set");

    assert!(container.get("services.fixture").is_ok());
}

#[test]
fn test_class_identifier_is_interpolated() {
    let container = container();
    container
        .set("parameters.class", FIXTURE_CLASS)
        .and_then(|c| c.set("services.fixture", json!({"class": "%parameters.class%"})))
        .expect("set");

    assert!(container.get("services.fixture").is_ok());
}

#[test]
fn test_unknown_class() {
    let container = container();
    container
        .set("services.ghost", json!({"class": "test.Ghost"}))
        .expect("set");

    let err = container.get("services.ghost").expect_err("unknown class");
    assert!(matches!(err, Error::Class { ref class, .. } if class == "test.Ghost"));
    assert!(err.to_string().contains(FIXTURE_CLASS));
}

#[test]
fn test_missing_method_fails_at_get() {
    let container = container();
    container
        .set(
            "services.fixture",
            json!({"class": FIXTURE_CLASS, "calls": [["explode", []]]}),
        )
        .expect("definition is accepted");

    let err = container.get("services.fixture").expect_err("missing method");
    assert_eq!(
        err.to_string(),
        format!("Class \"{FIXTURE_CLASS}\" does not have a method \"explode\"")
    );
    assert!(!container.is_compiled("services.fixture"));
}

#[test]
fn test_service_references_other_service() {
    let container = container();
    container
        .set("services.dep", json!({"class": FIXTURE_CLASS}))
        .and_then(|c| {
            c.set(
                "services.fixture",
                json!({"class": FIXTURE_CLASS, "arguments": ["%services.dep%"]}),
            )
        })
        .expect("set");

    let dep = container.get("services.dep").expect("dep");
    let injected = fixture(&container, "services.fixture", |f| f.arguments[0].clone());
    assert_eq!(injected, dep);
}

#[test]
fn test_service_descriptor_value() {
    let container = container();
    let descriptor = ServiceDescriptor::new(FIXTURE_CLASS, vec![Value::from(1)])
        .expect("descriptor")
        .set_property("label", "direct")
        .add_call("set", vec![Value::from("k"), Value::from("v")])
        .expect("call");
    container.set("services.fixture", descriptor).expect("set");

    fixture(&container, "services.fixture", |f| {
        assert_eq!(f.arguments, vec![Value::from(1)]);
        assert_eq!(f.values.get("k"), Some(&Value::from("v")));
    });
}

#[test]
fn test_alias_declared_by_service() {
    let container = container();
    container
        .set(
            "services.fixture",
            json!({"class": FIXTURE_CLASS, "alias": "fixture"}),
        )
        .expect("set");

    assert_eq!(
        container.get("aliases.fixture").expect("alias"),
        container.get("services.fixture").expect("service")
    );
}

#[test]
fn test_private_service_flag() {
    let container = container();
    container
        .set(
            "services.hidden",
            json!({"class": FIXTURE_CLASS, "public": false}),
        )
        .and_then(|c| c.set("services.shown", json!({"class": FIXTURE_CLASS})))
        .expect("set");

    assert!(container.is_compiled("public.services.hidden"));
    assert_eq!(
        container.get("public.services.hidden").expect("flag"),
        Value::Bool(false)
    );
    assert!(!container.has("public.services.shown"));
}

#[test]
fn test_public_flag_requires_bool() {
    let container = container();
    let err = container.set("public.services.x", "no").err().expect("string flag");
    assert!(matches!(err, Error::PublicInvalidType { .. }));
}

#[test]
fn test_invalid_service_values() {
    let container = container();

    let err = container.set("services.number", 5).err().expect("number");
    assert!(matches!(err, Error::ServiceInvalidType { .. }));

    let err = container
        .set("services.classless", json!({"arguments": []}))
        .err()
        .expect("no class");
    assert!(matches!(err, Error::ServiceSyntax { .. }));

    let err = container
        .set("services.alias", json!({"class": FIXTURE_CLASS, "alias": 3}))
        .err()
        .expect("bad alias");
    assert!(matches!(err, Error::AliasInvalidType { .. }));
}

#[test]
fn test_live_object_and_opaque_values_are_accepted() {
    let container = container();
    let live = ServiceRef::from_service(FIXTURE_CLASS, Fixture::default());
    let opaque = Value::opaque(Arc::new(17_u32));
    container
        .set("services.live", live.clone())
        .and_then(|c| c.set("services.opaque", opaque.clone()))
        .expect("set");

    assert_eq!(container.get("services.live").expect("live"), Value::Object(live));
    assert_eq!(container.get("services.opaque").expect("opaque"), opaque);
}

#[test]
fn test_get_service_wrong_type() {
    let container = container();
    container.set("parameters.x", 1).expect("set");

    assert!(matches!(
        container.get_service::<Fixture, _>("parameters.x", |_| ()),
        Err(Error::InvalidType { .. })
    ));
}

#[test]
fn test_concurrent_gets_share_one_instance() {
    let container = container();
    container
        .set("services.fixture", json!({"class": FIXTURE_CLASS}))
        .expect("set");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let container: Container = container.clone();
            thread::spawn(move || container.get("services.fixture").expect("service"))
        })
        .collect();
    let instances: Vec<Value> = handles
        .into_iter()
        .map(|h| h.join().expect("thread"))
        .collect();

    assert!(instances.windows(2).all(|pair| pair[0] == pair[1]));
}
