//! Content addressing for assemblies.
//!
//! An assembly's `schema_hash` is the SHA-256 of its canonical serialization:
//! keys sorted at every depth, no insignificant whitespace, and the top-level
//! `schema_hash` key removed. Identical content always yields an identical hash.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use wirecheck_types::Assembly;

/// Key excluded from the digest.
pub const HASH_FIELD: &str = "schema_hash";

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Recursively sort object keys.
pub fn canonicalize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().cloned().collect();
            keys.sort();
            let mut out = Map::new();
            for k in keys {
                if let Some(v) = map.get(&k) {
                    out.insert(k, canonicalize_json(v));
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize_json).collect()),
        other => other.clone(),
    }
}

/// Compact canonical serialization of a document with the hash field stripped.
pub fn canonical_string(document: &Value) -> serde_json::Result<String> {
    let mut document = document.clone();
    if let Value::Object(map) = &mut document {
        map.remove(HASH_FIELD);
    }
    serde_json::to_string(&canonicalize_json(&document))
}

/// Digest of an arbitrary assembly-shaped JSON document.
pub fn content_hash(document: &Value) -> serde_json::Result<String> {
    Ok(sha256_hex(canonical_string(document)?.as_bytes()))
}

/// Digest of a typed assembly. The current `schema_hash` value never affects the result.
pub fn assembly_hash(assembly: &Assembly) -> serde_json::Result<String> {
    content_hash(&serde_json::to_value(assembly)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn canonical_string_sorts_nested_keys_and_drops_hash() {
        let doc = json!({
            "schema_hash": "stale",
            "b": { "z": 1, "a": [ { "y": true, "x": null } ] },
            "a": "first"
        });
        assert_eq!(
            canonical_string(&doc).expect("serialize"),
            r#"{"a":"first","b":{"a":[{"x":null,"y":true}],"z":1}}"#
        );
    }

    #[test]
    fn nested_schema_hash_keys_are_content() {
        let a = json!({ "extra": { "schema_hash": "1" } });
        let b = json!({ "extra": { "schema_hash": "2" } });
        assert_ne!(content_hash(&a).expect("hash"), content_hash(&b).expect("hash"));
    }

    #[test]
    fn null_and_missing_hash_differently() {
        let missing = json!({ "labels": {} });
        let null = json!({ "labels": { "offset_mm": null } });
        assert_ne!(
            content_hash(&missing).expect("hash"),
            content_hash(&null).expect("hash")
        );
    }
}
