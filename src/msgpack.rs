// MessagePack codec for the JSON payload convention
//
// Tuples and keys cross the boundary as MessagePack arrays, while callers
// describe them as JSON text. The codec is pure and runs on the guest
// side; it is the one subsystem that works without an attached host.

use rmpv::Value;
use serde_json::Value as Json;

use crate::error::{MsgpackError, MsgpackResult};

/// Encode a UTF-8 JSON document into MessagePack bytes.
pub fn encode(data: &[u8]) -> MsgpackResult<Vec<u8>> {
    let json: Json = serde_json::from_slice(data)
        .map_err(|err| MsgpackError::new(format!("invalid JSON input: {err}")))?;
    rmp_serde::to_vec(&json).map_err(|err| MsgpackError::new(format!("encode failed: {err}")))
}

/// Decode MessagePack bytes back into a UTF-8 JSON document.
///
/// Values with no JSON image (binary, extension types, non-string map
/// keys) are rejected rather than re-encoded by guesswork.
pub fn decode(data: &[u8]) -> MsgpackResult<Vec<u8>> {
    let mut rest = data;
    let value = rmpv::decode::read_value(&mut rest)
        .map_err(|err| MsgpackError::new(format!("invalid MessagePack input: {err}")))?;
    if !rest.is_empty() {
        return Err(MsgpackError::new(format!(
            "{} trailing bytes after MessagePack value",
            rest.len()
        )));
    }
    let json = to_json(value)?;
    serde_json::to_vec(&json).map_err(|err| MsgpackError::new(format!("decode failed: {err}")))
}

fn to_json(value: Value) -> MsgpackResult<Json> {
    match value {
        Value::Nil => Ok(Json::Null),
        Value::Boolean(v) => Ok(Json::Bool(v)),
        Value::Integer(v) => {
            if let Some(i) = v.as_i64() {
                Ok(Json::from(i))
            } else if let Some(u) = v.as_u64() {
                Ok(Json::from(u))
            } else {
                Err(MsgpackError::new("integer out of JSON range"))
            }
        }
        Value::F32(v) => finite(f64::from(v)),
        Value::F64(v) => finite(v),
        Value::String(v) => match v.into_str() {
            Some(v) => Ok(Json::String(v)),
            None => Err(MsgpackError::new("string is not valid UTF-8")),
        },
        Value::Array(items) => {
            let items: MsgpackResult<Vec<Json>> = items.into_iter().map(to_json).collect();
            Ok(Json::Array(items?))
        }
        Value::Map(entries) => {
            let mut map = serde_json::Map::with_capacity(entries.len());
            for (key, value) in entries {
                let key = match key {
                    Value::String(key) => key
                        .into_str()
                        .ok_or_else(|| MsgpackError::new("map key is not valid UTF-8"))?,
                    other => {
                        return Err(MsgpackError::new(format!(
                            "map key {other} has no JSON representation"
                        )));
                    }
                };
                map.insert(key, to_json(value)?);
            }
            Ok(Json::Object(map))
        }
        Value::Binary(_) => Err(MsgpackError::new("binary has no JSON representation")),
        Value::Ext(tag, _) => {
            Err(MsgpackError::new(format!("extension type {tag} has no JSON representation")))
        }
    }
}

fn finite(v: f64) -> MsgpackResult<Json> {
    serde_json::Number::from_f64(v)
        .map(Json::Number)
        .ok_or_else(|| MsgpackError::new("non-finite number has no JSON representation"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_row_round_trips_byte_exact() {
        let input: &[u8] = br#"[1,"Alice",25]"#;
        let packed = encode(input).unwrap();
        assert_eq!(decode(&packed).unwrap(), input);
    }

    #[test]
    fn test_encode_produces_a_messagepack_array() {
        let packed = encode(br#"[1,"Alice",25]"#).unwrap();
        // fixarray of 3 elements, positive fixint 1.
        assert_eq!(packed[0], 0x93);
        assert_eq!(packed[1], 0x01);
    }

    #[test]
    fn test_scalars_round_trip() {
        for input in [&b"null"[..], b"true", b"false", b"0", b"-17", b"3.5", br#""hi""#] {
            let packed = encode(input).unwrap();
            assert_eq!(decode(&packed).unwrap(), input, "input {:?}", input);
        }
    }

    #[test]
    fn test_nested_structures_round_trip() {
        let input: &[u8] = br#"[[1,[2,[3]]],{"a":{"b":[null,true]}}]"#;
        let packed = encode(input).unwrap();
        assert_eq!(decode(&packed).unwrap(), input);
    }

    #[test]
    fn test_large_unsigned_round_trips() {
        let input = u64::MAX.to_string();
        let packed = encode(input.as_bytes()).unwrap();
        assert_eq!(decode(&packed).unwrap(), input.as_bytes());
    }

    #[test]
    fn test_encode_rejects_malformed_json() {
        let err = encode(b"[1,").unwrap_err();
        assert!(err.message.contains("invalid JSON input"));
    }

    #[test]
    fn test_encode_rejects_non_utf8() {
        assert!(encode(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        // fixarray of 3 with only one element present.
        let err = decode(&[0x93, 0x01]).unwrap_err();
        assert!(err.message.contains("invalid MessagePack input"));
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut packed = encode(b"[1]").unwrap();
        packed.push(0x01);
        let err = decode(&packed).unwrap_err();
        assert!(err.message.contains("trailing bytes"));
    }

    #[test]
    fn test_decode_rejects_binary() {
        // bin8 of two bytes.
        let err = decode(&[0xc4, 0x02, 0x00, 0x01]).unwrap_err();
        assert!(err.message.contains("binary"));
    }

    #[test]
    fn test_decode_rejects_ext() {
        // fixext1, tag 5.
        let err = decode(&[0xd4, 0x05, 0x00]).unwrap_err();
        assert!(err.message.contains("extension"));
    }

    #[test]
    fn test_decode_rejects_non_string_map_keys() {
        // fixmap {1: 2}.
        let err = decode(&[0x81, 0x01, 0x02]).unwrap_err();
        assert!(err.message.contains("map key"));
    }
}
