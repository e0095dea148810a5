use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Map, Value, json};
use wirecheck_hash::{assembly_hash, content_hash};
use wirecheck_types::Assembly;

fn ribbon() -> Assembly {
    let path = format!(
        "{}/../tests/fixtures/assemblies/ribbon_12way.json",
        env!("CARGO_MANIFEST_DIR")
    );
    let text = std::fs::read_to_string(path).expect("read fixture");
    Assembly::from_json_str(&text).expect("parse fixture")
}

#[test]
fn hash_ignores_current_schema_hash_value() {
    let mut a = ribbon();
    let mut b = ribbon();
    a.schema_hash = "one".to_string();
    b.schema_hash = String::new();
    assert_eq!(assembly_hash(&a).expect("hash"), assembly_hash(&b).expect("hash"));
}

#[test]
fn hash_changes_with_content() {
    let a = ribbon();
    let mut b = ribbon();
    b.cable.length_mm.set(601.0);
    assert_ne!(assembly_hash(&a).expect("hash"), assembly_hash(&b).expect("hash"));
}

#[test]
fn hash_is_lowercase_hex_sha256() {
    let hash = assembly_hash(&ribbon()).expect("hash");
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn typed_and_untyped_hash_agree() {
    let assembly = ribbon();
    let value = serde_json::to_value(&assembly).expect("to value");
    assert_eq!(
        assembly_hash(&assembly).expect("hash"),
        content_hash(&value).expect("hash")
    );
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

proptest! {
    #[test]
    fn insertion_order_does_not_change_hash(
        entries in proptest::collection::btree_map("[a-z]{1,5}", arb_leaf(), 0..8)
    ) {
        let mut forward = Map::new();
        for (k, v) in entries.iter() {
            forward.insert(k.clone(), v.clone());
        }
        let mut backward = Map::new();
        for (k, v) in entries.iter().rev() {
            backward.insert(k.clone(), v.clone());
        }
        let a = content_hash(&Value::Object(forward)).expect("hash");
        let b = content_hash(&Value::Object(backward)).expect("hash");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn schema_hash_key_never_matters(stamp in "[a-f0-9]{0,64}") {
        let base = json!({ "assembly_id": "x", "bom": [] });
        let mut stamped = base.clone();
        stamped["schema_hash"] = Value::String(stamp);
        prop_assert_eq!(content_hash(&base).expect("hash"), content_hash(&stamped).expect("hash"));
    }
}
