//! Textual JSON: serde integration, parsing and rendering.

use crate::{JsonArray, JsonError, JsonObject, JsonResult, JsonValue, Scalar};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for JsonObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl Serialize for JsonArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Object(o) => o.serialize(serializer),
            Self::Array(a) => a.serialize(serializer),
            Self::Scalar(s) => s.serialize(serializer),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = JsonValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any valid JSON value")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<JsonValue, E> {
        Ok(JsonValue::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<JsonValue, E> {
        Ok(JsonValue::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<JsonValue, E> {
        Ok(JsonValue::from(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<JsonValue, E> {
        Ok(JsonValue::from(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<JsonValue, E> {
        Ok(JsonValue::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<JsonValue, E> {
        Ok(JsonValue::from(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::NULL)
    }

    fn visit_none<E: de::Error>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::NULL)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<JsonValue, D::Error> {
        JsonValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<JsonValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<JsonValue>()? {
            items.push(item);
        }
        Ok(JsonValue::Array(JsonArray::from(items)))
    }

    // Keys go through the path builder so dotted keys become nested objects.
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<JsonValue, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, JsonValue>()? {
            entries.push((key, value));
        }
        Ok(JsonValue::Object(JsonObject::from_paths(entries)))
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for JsonObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match JsonValue::deserialize(deserializer)? {
            JsonValue::Object(object) => Ok(object),
            other => Err(de::Error::custom(format!(
                "expected object, found {}",
                other.kind()
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for JsonArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match JsonValue::deserialize(deserializer)? {
            JsonValue::Array(array) => Ok(array),
            other => Err(de::Error::custom(format!(
                "expected array, found {}",
                other.kind()
            ))),
        }
    }
}

/// Object keys containing the path separator are expanded into nested
/// objects.
impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::NULL,
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            Value::String(s) => Self::Scalar(Scalar::String(s)),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(JsonObject::from_paths(
                map.into_iter().map(|(key, value)| (key, Self::from(value))),
            )),
        }
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Scalar(Scalar::Null) => Self::Null,
            JsonValue::Scalar(Scalar::Bool(b)) => Self::Bool(b),
            JsonValue::Scalar(Scalar::Number(n)) => Self::Number(n),
            JsonValue::Scalar(Scalar::String(s)) => Self::String(s),
            JsonValue::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(object) => Self::Object(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Display for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Display for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for JsonValue {
    type Err = JsonError;

    fn from_str(s: &str) -> JsonResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl FromStr for JsonObject {
    type Err = JsonError;

    fn from_str(s: &str) -> JsonResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl FromStr for JsonArray {
    type Err = JsonError;

    fn from_str(s: &str) -> JsonResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl JsonValue {
    /// Renders the value as indented JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string_pretty(&self) -> JsonResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Parse`] if the bytes are not valid JSON.
    pub fn from_slice(bytes: &[u8]) -> JsonResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serializes any value into a [`JsonValue`].
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be represented as JSON.
    pub fn from_serialize<T: Serialize>(value: &T) -> JsonResult<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    /// Deserializes this value into any type.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not match `T`.
    pub fn deserialize_into<T: de::DeserializeOwned>(&self) -> JsonResult<T> {
        Ok(serde_json::from_value(serde_json::Value::from(self.clone()))?)
    }
}

impl JsonObject {
    /// Renders the object as indented JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string_pretty(&self) -> JsonResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_object;

    #[test]
    fn test_display_keeps_insertion_order() {
        let object = json_object! { "b" => 1, "a.x" => true, "c" => () };
        assert_eq!(object.to_string(), r#"{"b":1,"a":{"x":true},"c":null}"#);
    }

    #[test]
    fn test_parse_nested() {
        let value: JsonValue = r#"{"a":{"b":[1,2,{"c":"d"}]},"e":null}"#.parse().unwrap();

        assert_eq!(value.get::<Vec<JsonValue>>("a.b").unwrap().len(), 3);
        assert!(value.at("e").unwrap().is_null());
    }

    #[test]
    fn test_parse_keeps_key_order() {
        let object: JsonObject = r#"{"z":1,"a":2,"m":3}"#.parse().unwrap();
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(object.to_string(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn test_parse_expands_dotted_keys() {
        let object: JsonObject = r#"{"a.b": 1, "a": {"c": 2}}"#.parse().unwrap();
        assert_eq!(object, json_object! { "a.b" => 1, "a.c" => 2 });
    }

    #[test]
    fn test_parse_wide_object() {
        let body = (0..20_000)
            .map(|i| format!(r#""k{i}":{{"v":{i}}}"#))
            .collect::<Vec<_>>()
            .join(",");
        let object: JsonObject = format!("{{{body}}}").parse().unwrap();

        assert_eq!(object.len(), 20_000);
        assert_eq!(object.get::<i32>("k19999.v").unwrap(), 19_999);
        assert_eq!(object.keys().next(), Some("k0"));

        let converted =
            JsonValue::from(serde_json::Value::from(JsonValue::Object(object.clone())));
        assert_eq!(converted.as_object(), Some(&object));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "{".parse::<JsonValue>(),
            Err(JsonError::Parse(_))
        ));
        assert!(matches!("[1]".parse::<JsonObject>(), Err(JsonError::Parse(_))));
        assert!(matches!("{}".parse::<JsonArray>(), Err(JsonError::Parse(_))));
    }

    #[test]
    fn test_round_trip() {
        let object = json_object! {
            "user.name" => "Alice",
            "user.score" => 9.5,
            "user.tags" => vec!["x"],
            "active" => false,
        };
        let parsed: JsonObject = object.to_string().parse().unwrap();
        assert_eq!(parsed, object);
    }

    #[test]
    fn test_pretty() {
        let object = json_object! { "a" => 1 };
        assert_eq!(object.to_string_pretty().unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_serde_value_conversion() {
        let raw = serde_json::json!({ "a": { "b": [1, "x"] } });
        let value = JsonValue::from(raw.clone());
        assert_eq!(serde_json::Value::from(value), raw);
    }

    #[test]
    fn test_typed_round_trip() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let value = JsonValue::from_serialize(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(value.get::<i32>("y").unwrap(), 2);

        let point: Point = value.deserialize_into().unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_from_slice() {
        let value = JsonValue::from_slice(b"[true]").unwrap();
        assert_eq!(value, JsonValue::array([true]));
    }
}
