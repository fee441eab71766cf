//! Coercion of JSON values into Rust types.

use crate::{JsonArray, JsonObject, JsonValue, Scalar};

/// A type that can be read out of a [`JsonValue`].
///
/// Coercion is strict: numbers are not read as strings and strings are not
/// parsed as numbers.
pub trait FromJson: Sized {
    /// Name of the target type, used in error messages.
    const EXPECTED: &'static str;

    /// Converts the value, or returns `None` if it has the wrong shape.
    fn from_json(value: &JsonValue) -> Option<Self>;
}

impl FromJson for i32 {
    const EXPECTED: &'static str = "Int";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value
            .as_number()
            .and_then(serde_json::Number::as_i64)
            .and_then(|n| i32::try_from(n).ok())
    }
}

impl FromJson for i64 {
    const EXPECTED: &'static str = "Long";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_number().and_then(serde_json::Number::as_i64)
    }
}

impl FromJson for u64 {
    const EXPECTED: &'static str = "UnsignedLong";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_number().and_then(serde_json::Number::as_u64)
    }
}

impl FromJson for f64 {
    const EXPECTED: &'static str = "Double";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_number().and_then(serde_json::Number::as_f64)
    }
}

impl FromJson for bool {
    const EXPECTED: &'static str = "Boolean";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromJson for String {
    const EXPECTED: &'static str = "String";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromJson for JsonValue {
    const EXPECTED: &'static str = "Value";

    fn from_json(value: &JsonValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromJson for JsonObject {
    const EXPECTED: &'static str = "Object";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl FromJson for JsonArray {
    const EXPECTED: &'static str = "Array";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_array().cloned()
    }
}

impl FromJson for Scalar {
    const EXPECTED: &'static str = "Scalar";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_scalar().cloned()
    }
}

/// `null` reads as `None`; anything else must convert to `T`.
impl<T: FromJson> FromJson for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_json(value: &JsonValue) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_json(value).map(Some)
        }
    }
}

/// Every item must convert to `T`.
impl<T: FromJson> FromJson for Vec<T> {
    const EXPECTED: &'static str = "Array";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_array()?.iter().map(T::from_json).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        let value = JsonValue::from(42);
        assert_eq!(i32::from_json(&value), Some(42));
        assert_eq!(i64::from_json(&value), Some(42));
        assert_eq!(u64::from_json(&value), Some(42));
        assert_eq!(f64::from_json(&value), Some(42.0));
    }

    #[test]
    fn test_int_out_of_range() {
        let value = JsonValue::from(i64::from(i32::MAX) + 1);
        assert_eq!(i32::from_json(&value), None);
        assert_eq!(i64::from_json(&value), Some(i64::from(i32::MAX) + 1));
    }

    #[test]
    fn test_float_is_not_integer() {
        let value = JsonValue::from(1.5);
        assert_eq!(i32::from_json(&value), None);
        assert_eq!(f64::from_json(&value), Some(1.5));
    }

    #[test]
    fn test_no_cross_coercion() {
        assert_eq!(String::from_json(&JsonValue::from(1)), None);
        assert_eq!(i32::from_json(&JsonValue::from("1")), None);
        assert_eq!(bool::from_json(&JsonValue::from("true")), None);
    }

    #[test]
    fn test_option() {
        assert_eq!(Option::<i32>::from_json(&JsonValue::NULL), Some(None));
        assert_eq!(Option::<i32>::from_json(&JsonValue::from(1)), Some(Some(1)));
        assert_eq!(Option::<i32>::from_json(&JsonValue::from("x")), None);
    }

    #[test]
    fn test_vec() {
        let value = JsonValue::array([1, 2, 3]);
        assert_eq!(Vec::<i32>::from_json(&value), Some(vec![1, 2, 3]));

        let mixed = JsonValue::array([JsonValue::from(1), JsonValue::from("x")]);
        assert_eq!(Vec::<i32>::from_json(&mixed), None);
        assert_eq!(Vec::<i32>::from_json(&JsonValue::from(1)), None);
    }

    #[test]
    fn test_structural() {
        let value = JsonValue::object([("a", 1)]);
        assert!(JsonObject::from_json(&value).is_some());
        assert!(JsonArray::from_json(&value).is_none());
        assert_eq!(JsonValue::from_json(&value), Some(value.clone()));
        assert!(Scalar::from_json(&value).is_none());
    }
}
