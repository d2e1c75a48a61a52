use icumsg::{Value, values};
use time::macros::datetime;

#[test]
fn empty_values() {
    let v = values! {};
    assert!(v.is_empty());
}

#[test]
fn primitives() {
    let v = values! {
        "count" => 3,
        "name" => "Bob",
        "score" => 9.5_f64,
        "admin" => true
    };
    assert_eq!(v.len(), 4);
    assert_eq!(v["count"].as_number(), Some(3));
    assert_eq!(v["name"].as_string(), Some("Bob"));
    assert_eq!(v["score"].as_float(), Some(9.5));
    assert_eq!(v["admin"], Value::Bool(true));
}

#[test]
fn trailing_comma() {
    let v = values! {
        "a" => 1,
        "b" => 2,
    };
    assert_eq!(v.len(), 2);
    assert_eq!(v["b"].as_number(), Some(2));
}

#[test]
fn integer_types() {
    let v = values! {
        "i32" => 10_i32,
        "i64" => 20_i64,
        "u32" => 30_u32,
        "usize" => 50_usize
    };
    assert_eq!(v["i32"].as_number(), Some(10));
    assert_eq!(v["i64"].as_number(), Some(20));
    assert_eq!(v["u32"].as_number(), Some(30));
    assert_eq!(v["usize"].as_number(), Some(50));
}

#[test]
fn owned_keys_and_values() {
    let key = String::from("name");
    let name = String::from("Charlie");
    let v = values! { key => name };
    assert_eq!(v["name"].as_string(), Some("Charlie"));
}

#[test]
fn dates_objects_and_tags() {
    let date = datetime!(2024-01-02 03:04:05 UTC);
    let v = values! {
        "when" => date,
        "icon" => Value::object(7_u8),
        "b" => Value::tag(|children| children),
    };
    assert_eq!(v["when"], Value::Date(date));
    assert_eq!(v["icon"].kind(), "object");
    assert_eq!(v["b"].kind(), "function");
    assert!(!v["b"].is_primitive());
}

#[test]
fn later_keys_overwrite_earlier() {
    let v = values! { "x" => 1, "x" => 2 };
    assert_eq!(v.len(), 1);
    assert_eq!(v["x"].as_number(), Some(2));
}
