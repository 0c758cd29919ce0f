use plinth_domain::value::{ConfigMap, Value, merge};
use std::time::Duration;

#[test]
fn merge_is_last_writer_wins() {
    let mut base = ConfigMap::from([
        ("host".to_owned(), Value::from("localhost")),
        ("port".to_owned(), Value::from(8080)),
    ]);
    let overlay = ConfigMap::from([
        ("port".to_owned(), Value::from(9090)),
        ("debug".to_owned(), Value::from(true)),
    ]);

    merge(&mut base, overlay);

    assert_eq!(base["host"], Value::from("localhost"));
    assert_eq!(base["port"], Value::from(9090));
    assert_eq!(base["debug"], Value::from(true));
}

#[test]
fn merge_replaces_nested_maps_wholesale() {
    let mut base = ConfigMap::from([(
        "db".to_owned(),
        Value::from(ConfigMap::from([
            ("host".to_owned(), Value::from("a")),
            ("pool".to_owned(), Value::from(4)),
        ])),
    )]);
    let overlay = ConfigMap::from([(
        "db".to_owned(),
        Value::from(ConfigMap::from([("host".to_owned(), Value::from("b"))])),
    )]);

    merge(&mut base, overlay);

    let db = base["db"].as_map().expect("map value");
    assert_eq!(db["host"], Value::from("b"));
    assert!(!db.contains_key("pool"), "shallow merge must not keep stale nested keys");
}

#[test]
fn conversions_keep_numeric_kind() {
    assert_eq!(Value::from(8080_u16), Value::Int(8080));
    assert_eq!(Value::from(1.5), Value::Float(1.5));
    assert_eq!(Value::from(Duration::from_millis(2500)), Value::Float(2.5));
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some("x")), Value::from("x"));
}

#[test]
fn accessors_widen_ints_to_float_only() {
    let int = Value::from(3);
    assert_eq!(int.as_int(), Some(3));
    assert_eq!(int.as_float(), Some(3.0));

    let float = Value::from(3.5);
    assert_eq!(float.as_int(), None);
    assert_eq!(float.as_float(), Some(3.5));
}

#[test]
fn display_is_human_oriented() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::from("plain").to_string(), "plain");
    assert_eq!(
        Value::from(vec![Value::from(1), Value::from("two")]).to_string(),
        "[1, two]"
    );

    let map = ConfigMap::from([
        ("a".to_owned(), Value::from(1)),
        ("b".to_owned(), Value::from(true)),
    ]);
    assert_eq!(Value::from(map).to_string(), "{a: 1, b: true}");
}

#[test]
fn json_round_trip_preserves_kinds() {
    let map = ConfigMap::from([
        ("port".to_owned(), Value::from(8080)),
        ("rate".to_owned(), Value::from(0.5)),
        ("name".to_owned(), Value::from("svc")),
        ("off".to_owned(), Value::Null),
    ]);

    let raw = serde_json::to_string(&Value::from(map.clone())).expect("serialize");
    let back: Value = serde_json::from_str(&raw).expect("deserialize");
    assert_eq!(back, Value::from(map));
}
