//! Unit tests for container values

use serde_json::json;
use wirebox_domain::{Error, Value, ValueKind, validate};

#[test]
fn test_from_json_keeps_structure() {
    let value = Value::from(json!({ "a": [1, "two", null], "b": { "c": true } }));

    let map = value.as_map().expect("map");
    let a = map["a"].as_array().expect("array");
    assert_eq!(a[0].as_i64(), Some(1));
    assert_eq!(a[1].as_str(), Some("two"));
    assert!(a[2].is_null());
    assert_eq!(map["b"].as_map().expect("map")["c"].as_bool(), Some(true));
}

#[test]
fn test_to_json_round_trip_of_plain_data() {
    let raw = json!({ "list": [1.5, "x", false], "nested": { "k": null } });
    assert_eq!(Value::from(raw.clone()).to_json(), Some(raw));
}

#[test]
fn test_kinds() {
    assert_eq!(Value::Null.kind(), ValueKind::Null);
    assert_eq!(Value::from(1.5).kind(), ValueKind::Number);
    assert_eq!(Value::opaque(()).kind(), ValueKind::Opaque);
    assert!(Value::from("x").is_plain());
    assert!(!Value::opaque(()).is_plain());
}

#[test]
fn test_text_form_only_for_strings_and_numbers() {
    assert_eq!(Value::from(123).to_text().as_deref(), Some("123"));
    assert_eq!(Value::from("abc").to_text().as_deref(), Some("abc"));
    assert_eq!(Value::from(false).to_text(), None);
    assert_eq!(Value::Null.to_text(), None);
}

#[test]
fn test_integral_float_text_has_no_fraction() {
    assert_eq!(Value::from(2.0).to_text().as_deref(), Some("2"));
    assert_eq!(Value::from(-0.0).to_text().as_deref(), Some("0"));
    assert_eq!(Value::from(2.5).to_text().as_deref(), Some("2.5"));
    assert_eq!(Value::from(json!(1e300)).to_text(), Some(json!(1e300).to_string()));
}

#[test]
fn test_map_keeps_declaration_order() {
    let value = Value::from(json!({ "zeta": 1, "alpha": 2, "mid": 3 }));
    let keys: Vec<&str> = value
        .as_map()
        .expect("map")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_non_finite_float_becomes_null() {
    assert!(Value::from(f64::NAN).is_null());
}

#[test]
fn test_validate() {
    assert!(validate(&Value::from("x"), &[ValueKind::String], "key").is_ok());
    let err = validate(&Value::from(0), &[ValueKind::Map], "data").expect_err("not a map");
    match err {
        Error::InvalidType {
            context,
            expected,
            found,
        } => {
            assert_eq!(context, "data");
            assert_eq!(expected, "map");
            assert_eq!(found, "number");
        }
        _ => panic!("Expected InvalidType error"),
    }
}

#[test]
fn test_opaque_downcast() {
    let value = Value::opaque(String::from("payload"));
    let Value::Opaque(opaque) = &value else {
        panic!("Expected opaque value");
    };
    assert_eq!(
        opaque.downcast_ref::<String>().map(String::as_str),
        Some("payload")
    );
    assert!(opaque.downcast_ref::<u32>().is_none());
}
