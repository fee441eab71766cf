//! Deep merge of JSON trees.

use crate::{JsonMap, JsonObject, JsonValue};

/// Which operand wins when both sides hold a value at the same key and
/// at least one of them is not an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Keep the receiver's value.
    Left,
    /// Keep the argument's value.
    Right,
}

/// Unions two objects key by key.
///
/// Keys present on one side only are carried over. Keys present on both
/// sides recurse when both values are objects; otherwise the priority side
/// is kept whole. Neither operand is modified.
pub(crate) fn merge_objects(left: &JsonObject, right: &JsonObject, priority: Priority) -> JsonObject {
    let mut merged = left.entries().clone();
    merge_into(&mut merged, right.clone(), priority);
    JsonObject::from_entries_unchecked(merged)
}

/// Merges `incoming` into `target` in place, moving its values.
///
/// `target` plays the left operand.
pub(crate) fn merge_into(target: &mut JsonMap, incoming: JsonObject, priority: Priority) {
    for (key, value) in incoming {
        match target.get_mut(&key) {
            Some(existing) => merge_value_into(existing, value, priority),
            None => {
                target.insert(key, value);
            }
        }
    }
}

fn merge_value_into(existing: &mut JsonValue, incoming: JsonValue, priority: Priority) {
    match (existing, incoming) {
        (JsonValue::Object(left), JsonValue::Object(right)) => {
            merge_into(left.entries_mut(), right, priority);
        }
        (slot, incoming) => {
            if priority == Priority::Right {
                *slot = incoming;
            }
        }
    }
}

/// Merges two values.
///
/// Only object/object pairs are combined. Every other pairing, including
/// arrays on both sides, resolves to the priority side.
pub(crate) fn merge_values(left: &JsonValue, right: &JsonValue, priority: Priority) -> JsonValue {
    match (left, right) {
        (JsonValue::Object(l), JsonValue::Object(r)) => {
            JsonValue::Object(merge_objects(l, r, priority))
        }
        _ => match priority {
            Priority::Left => left.clone(),
            Priority::Right => right.clone(),
        },
    }
}
