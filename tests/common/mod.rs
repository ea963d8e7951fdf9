extern crate serde;
extern crate serde_json;
extern crate rmp_serde;

use std::fmt::Debug;

/// Asserts that `value` survives both wire formats replicas
/// exchange ops and snapshots in: JSON and MessagePack.
pub fn test_serde<T>(value: T)
    where T: Debug + PartialEq + serde::Serialize + serde::de::DeserializeOwned
{
    let json = serde_json::to_string(&value).unwrap();
    let from_json: T = serde_json::from_str(&json).unwrap();
    assert_eq!(value, from_json, "JSON: {}", json);

    let msgpack = rmp_serde::to_vec(&value).unwrap();
    let from_msgpack: T = rmp_serde::from_slice(&msgpack).unwrap();
    assert_eq!(value, from_msgpack, "MessagePack: {:?}", msgpack);
}
