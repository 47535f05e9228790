// Codec round-trip properties

use proptest::prelude::*;
use serde_json::Value as Json;

use tarlink::msgpack;

#[test]
fn test_example_row_round_trips_byte_exact() {
    let input: &[u8] = br#"[1,"Alice",25]"#;
    let packed = msgpack::encode(input).unwrap();
    assert_eq!(msgpack::decode(&packed).unwrap(), input);
}

#[test]
fn test_floats_round_trip() {
    for input in [&b"3.5"[..], b"-0.5", b"1e300", b"2.5e-10"] {
        let packed = msgpack::encode(input).unwrap();
        let back = msgpack::decode(&packed).unwrap();
        let left: Json = serde_json::from_slice(input).unwrap();
        let right: Json = serde_json::from_slice(&back).unwrap();
        assert_eq!(left, right, "input {:?}", String::from_utf8_lossy(input));
    }
}

#[test]
fn test_unicode_strings_round_trip() {
    let value = serde_json::json!(["\u{43f}\u{440}\u{438}\u{432}\u{435}\u{442}", "\u{1f980}"]);
    let input = serde_json::to_vec(&value).unwrap();
    let packed = msgpack::encode(&input).unwrap();
    assert_eq!(msgpack::decode(&packed).unwrap(), input);
}

#[test]
fn test_object_keys_survive() {
    let input: &[u8] = br#"{"age":25,"name":"Alice"}"#;
    let packed = msgpack::encode(input).unwrap();
    assert_eq!(msgpack::decode(&packed).unwrap(), input);
}

fn arb_json() -> impl Strategy<Value = Json> {
    let leaf = prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::Bool),
        any::<i64>().prop_map(Json::from),
        any::<u64>().prop_map(Json::from),
        any::<String>().prop_map(Json::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..8).prop_map(Json::Array),
            proptest::collection::btree_map(any::<String>(), inner, 0..8)
                .prop_map(|map| Json::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    /// decode(encode(x)) == x for every JSON-representable value.
    #[test]
    fn prop_round_trip_preserves_value(value in arb_json()) {
        let text = serde_json::to_vec(&value).unwrap();
        let packed = msgpack::encode(&text).unwrap();
        let back = msgpack::decode(&packed).unwrap();
        let reparsed: Json = serde_json::from_slice(&back).unwrap();
        prop_assert_eq!(reparsed, value);
    }

    /// Encoding is deterministic: one input, one byte sequence.
    #[test]
    fn prop_encode_is_deterministic(value in arb_json()) {
        let text = serde_json::to_vec(&value).unwrap();
        prop_assert_eq!(msgpack::encode(&text).unwrap(), msgpack::encode(&text).unwrap());
    }
}
