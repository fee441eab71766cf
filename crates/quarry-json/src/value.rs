//! The [`JsonValue`] tree and its scalar leaves.

use crate::{path, FromJson, JsonArray, JsonError, JsonMap, JsonObject, JsonResult};
use serde_json::Number;
use std::fmt;

/// Discriminator for the shape of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// An object.
    Object,
    /// An array.
    Array,
    /// A string scalar.
    String,
    /// A number scalar.
    Number,
    /// A boolean scalar.
    Bool,
    /// The null scalar.
    Null,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object => write!(f, "object"),
            Self::Array => write!(f, "array"),
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::Bool => write!(f, "boolean"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    /// `null`.
    #[default]
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A finite number.
    Number(Number),
    /// A string.
    String(String),
}

impl Scalar {
    /// Returns the kind of this scalar.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
        }
    }
}

/// An immutable JSON tree: object, array or scalar.
///
/// Every transformation returns a new value and leaves its operands
/// untouched.
///
/// # Example
///
/// ```rust
/// use quarry_json::{JsonValue, ValueKind};
///
/// let value = JsonValue::object([("user.name", JsonValue::from("Alice")), ("user.age", 30.into())]);
///
/// assert_eq!(value.kind(), ValueKind::Object);
/// assert_eq!(value.get::<String>("user.name").unwrap(), "Alice");
/// assert_eq!(value.get_option::<i32>("user.email"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// A mapping from keys to values.
    Object(JsonObject),
    /// An ordered sequence of values.
    Array(JsonArray),
    /// A leaf value.
    Scalar(Scalar),
}

impl Default for JsonValue {
    fn default() -> Self {
        Self::Scalar(Scalar::Null)
    }
}

impl JsonValue {
    /// The `null` value.
    pub const NULL: JsonValue = JsonValue::Scalar(Scalar::Null);

    /// Builds an object from `(path, value)` pairs. See [`JsonObject::from_paths`].
    pub fn object<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<JsonValue>,
    {
        Self::Object(JsonObject::from_paths(pairs))
    }

    /// Builds an array from values.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Returns the kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Object(_) => ValueKind::Object,
            Self::Array(_) => ValueKind::Array,
            Self::Scalar(s) => s.kind(),
        }
    }

    /// Returns true for objects.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns true for arrays.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns true for scalars, including `null`.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Returns true for `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    /// Returns the object, if this is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the array, if this is one.
    #[must_use]
    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the scalar, if this is one.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the string, if this is a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this is a number scalar.
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Scalar(Scalar::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean scalar.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value at a dotted path.
    ///
    /// Only objects can be descended into.
    pub fn at(&self, path: &str) -> JsonResult<&JsonValue> {
        match self {
            Self::Object(o) => o.at(path),
            other => Err(JsonError::NotAnObject {
                path: path.to_string(),
                segment: path::first_segment(path).to_string(),
                found: other.kind(),
            }),
        }
    }

    /// Reads the value at a dotted path as `T`.
    pub fn get<T: FromJson>(&self, path: &str) -> JsonResult<T> {
        let value = self.at(path)?;
        T::from_json(value).ok_or_else(|| JsonError::Incompatible {
            path: path.to_string(),
            expected: T::EXPECTED,
            found: value.kind(),
        })
    }

    /// Like [`JsonValue::get`], yielding `None` on any failure.
    #[must_use]
    pub fn get_option<T: FromJson>(&self, path: &str) -> Option<T> {
        self.get(path).ok()
    }

    /// Merges two values, keeping the left side on conflicting leaves.
    ///
    /// Objects are unioned recursively. When either operand is not an
    /// object the left operand is returned unchanged.
    #[must_use]
    pub fn merge_left(&self, other: &JsonValue) -> JsonValue {
        crate::merge::merge_values(self, other, crate::Priority::Left)
    }

    /// Merges two values, keeping the right side on conflicting leaves.
    ///
    /// When either operand is not an object the right operand is returned.
    #[must_use]
    pub fn merge_right(&self, other: &JsonValue) -> JsonValue {
        crate::merge::merge_values(self, other, crate::Priority::Right)
    }

    /// Applies a structural transformation and returns a value of the same
    /// variant.
    ///
    /// Objects go through `on_object` (see [`JsonObject::within`]) and
    /// arrays through `on_array`. Scalars have no structure and come back
    /// unchanged.
    #[must_use]
    pub fn within<O, A>(&self, on_object: O, on_array: A) -> JsonValue
    where
        O: FnOnce(JsonMap) -> JsonMap,
        A: FnOnce(Vec<JsonValue>) -> Vec<JsonValue>,
    {
        match self {
            Self::Object(object) => Self::Object(object.within(on_object)),
            Self::Array(array) => Self::Array(array.within(on_array)),
            Self::Scalar(_) => self.clone(),
        }
    }
}

impl From<Scalar> for JsonValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(value: JsonObject) -> Self {
        Self::Object(value)
    }
}

impl From<JsonArray> for JsonValue {
    fn from(value: JsonArray) -> Self {
        Self::Array(value)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::String(value))
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<Number> for JsonValue {
    fn from(value: Number) -> Self {
        Self::Scalar(Scalar::Number(value))
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for JsonValue {
                fn from(value: $t) -> Self {
                    Self::Scalar(Scalar::Number(Number::from(value)))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<f64> for JsonValue {
    // Non-finite floats have no JSON form and become null.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::NULL, |n| Self::Scalar(Scalar::Number(n)))
    }
}

impl From<()> for JsonValue {
    fn from((): ()) -> Self {
        Self::NULL
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NULL, Into::into)
    }
}

impl<T: Into<JsonValue>> From<Vec<T>> for JsonValue {
    fn from(value: Vec<T>) -> Self {
        Self::array(value)
    }
}
