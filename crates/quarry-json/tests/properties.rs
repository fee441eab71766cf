//! Property tests for JSON construction, merge and text form.

use proptest::prelude::*;
use quarry_json::{JsonArray, JsonObject, JsonValue};

fn key() -> impl Strategy<Value = String> {
    "[a-z]{1,4}"
}

fn scalar() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        Just(JsonValue::NULL),
        any::<bool>().prop_map(JsonValue::from),
        any::<i64>().prop_map(JsonValue::from),
        // Quarter steps are exact in binary and in decimal text.
        (-4000i32..4000).prop_map(|n| JsonValue::from(f64::from(n) / 4.0)),
        "[a-zA-Z0-9 _-]{0,8}".prop_map(JsonValue::from),
    ]
}

fn value() -> impl Strategy<Value = JsonValue> {
    scalar().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|items| JsonValue::array(items)),
            prop::collection::vec((key(), inner), 0..4)
                .prop_map(|pairs| JsonValue::object(pairs)),
        ]
    })
}

fn object() -> impl Strategy<Value = JsonObject> {
    prop::collection::vec((key(), value()), 0..5).prop_map(|pairs| JsonObject::from_paths(pairs))
}

proptest! {
    #[test]
    fn text_form_parses_back_to_same_value(v in value()) {
        let parsed: JsonValue = v.to_string().parse().unwrap();
        prop_assert_eq!(parsed, v);
    }

    #[test]
    fn pretty_text_parses_back_to_same_value(v in value()) {
        let parsed: JsonValue = v.to_string_pretty().unwrap().parse().unwrap();
        prop_assert_eq!(parsed, v);
    }

    #[test]
    fn serde_json_value_conversion_is_lossless(v in value()) {
        let raw = serde_json::Value::from(v.clone());
        prop_assert_eq!(JsonValue::from(raw), v);
    }

    #[test]
    fn within_identity_is_structurally_equal(o in object()) {
        prop_assert_eq!(o.within(|map| map), o);
    }

    #[test]
    fn value_within_identity_is_structurally_equal(v in value()) {
        prop_assert_eq!(v.within(|map| map, |items| items), v);
    }

    #[test]
    fn merge_with_self_is_identity(o in object()) {
        prop_assert_eq!(o.merge_left(&o), o.clone());
        prop_assert_eq!(o.merge_right(&o), o);
    }

    #[test]
    fn merge_with_empty_is_identity(o in object()) {
        let empty = JsonObject::new();
        prop_assert_eq!(o.merge_left(&empty), o.clone());
        prop_assert_eq!(empty.merge_left(&o), o.clone());
        prop_assert_eq!(o.merge_right(&empty), o.clone());
        prop_assert_eq!(empty.merge_right(&o), o);
    }

    #[test]
    fn merge_left_mirrors_merge_right(a in object(), b in object()) {
        prop_assert_eq!(a.merge_left(&b), b.merge_right(&a));
    }

    #[test]
    fn merge_keeps_every_top_level_key(a in object(), b in object()) {
        let merged = a.merge_left(&b);
        for key in a.keys().chain(b.keys()) {
            prop_assert!(merged.get_key(key).is_some());
        }
        prop_assert!(merged.len() <= a.len() + b.len());
    }

    #[test]
    fn merge_left_keeps_left_leaves(a in object(), b in object()) {
        let merged = a.merge_left(&b);
        for (key, left) in &a {
            if !left.is_object() {
                prop_assert_eq!(merged.get_key(key), Some(left));
            }
        }
    }

    #[test]
    fn value_placed_at_path_is_found_there(
        segments in prop::collection::vec(key(), 1..5),
        leaf in scalar(),
    ) {
        let path = segments.join(".");
        let object = JsonObject::from_paths([(path.as_str(), leaf.clone())]);
        prop_assert_eq!(object.at(&path).unwrap(), &leaf);
        prop_assert!(object.keys().all(|k| !k.contains('.')));
    }

    #[test]
    fn concat_preserves_order_and_length(
        left in prop::collection::vec(scalar(), 0..6),
        right in prop::collection::vec(scalar(), 0..6),
    ) {
        let a: JsonArray = left.iter().cloned().collect();
        let b: JsonArray = right.iter().cloned().collect();
        let joined = a.concat(&b);

        prop_assert_eq!(joined.len(), left.len() + right.len());
        let expected: Vec<JsonValue> = left.into_iter().chain(right).collect();
        prop_assert_eq!(Vec::<JsonValue>::from(joined), expected);
    }
}
