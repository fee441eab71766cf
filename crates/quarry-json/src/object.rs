//! JSON objects addressed by dotted paths.

use crate::merge::{self, Priority};
use crate::{path, FromJson, JsonError, JsonResult, JsonValue};
use indexmap::IndexMap;

/// Backing map of a [`JsonObject`].
pub type JsonMap = IndexMap<String, JsonValue>;

/// A JSON object.
///
/// Keys never contain the path separator: every constructor routes its
/// input through the path builder, so `"a.b"` always becomes a nested
/// object. Insertion order is kept for output; equality ignores it.
///
/// # Example
///
/// ```rust
/// use quarry_json::JsonObject;
///
/// let base = JsonObject::from_paths([("a.b.c.x", 10)]);
/// let extra = JsonObject::from_paths([("a.a", 100), ("a.b", 200)]);
///
/// // `a.b` is an object on the left and a number on the right: left wins.
/// let merged = base.merge_left(&extra);
/// assert_eq!(merged.get::<i32>("a.b.c.x").unwrap(), 10);
/// assert_eq!(merged.get::<i32>("a.a").unwrap(), 100);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObject {
    entries: JsonMap,
}

impl JsonObject {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an object from `(path, value)` pairs.
    ///
    /// Each pair becomes a single-branch nested object; the branches are
    /// then merged left to right with the earlier pair winning conflicts.
    pub fn from_paths<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<JsonValue>,
    {
        let mut entries = JsonMap::new();
        for (key, value) in pairs {
            let branch = path::nest(key.as_ref(), value.into());
            merge::merge_into(&mut entries, branch, Priority::Left);
        }
        Self { entries }
    }

    pub(crate) fn single(key: &str, value: JsonValue) -> Self {
        let mut entries = JsonMap::with_capacity(1);
        entries.insert(key.to_string(), value);
        Self { entries }
    }

    /// Wraps a map whose keys are already known to be plain segments.
    pub(crate) fn from_entries_unchecked(entries: JsonMap) -> Self {
        Self { entries }
    }

    pub(crate) fn entries_mut(&mut self) -> &mut JsonMap {
        &mut self.entries
    }

    /// Returns the backing map.
    #[must_use]
    pub fn entries(&self) -> &JsonMap {
        &self.entries
    }

    /// Returns the value stored under a single key, without path splitting.
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&JsonValue> {
        self.entries.get(key)
    }

    /// Returns the value at a dotted path.
    pub fn at(&self, path: &str) -> JsonResult<&JsonValue> {
        path::resolve(self, path)
    }

    /// Returns true if a value exists at the dotted path.
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.at(path).is_ok()
    }

    /// Reads the value at a dotted path as `T`.
    ///
    /// # Errors
    ///
    /// Fails when a segment is missing, when a non-object sits on the
    /// path, or when the value cannot be coerced to `T`.
    pub fn get<T: FromJson>(&self, path: &str) -> JsonResult<T> {
        let value = self.at(path)?;
        T::from_json(value).ok_or_else(|| JsonError::Incompatible {
            path: path.to_string(),
            expected: T::EXPECTED,
            found: value.kind(),
        })
    }

    /// Like [`JsonObject::get`], yielding `None` on any failure.
    #[must_use]
    pub fn get_option<T: FromJson>(&self, path: &str) -> Option<T> {
        self.get(path).ok()
    }

    /// Returns a copy with `value` placed at `path`, replacing whatever
    /// conflicts with it.
    #[must_use]
    pub fn with(&self, path: &str, value: impl Into<JsonValue>) -> Self {
        self.merge_right(&path::nest(path, value.into()))
    }

    /// Deep merge keeping this object's values on conflicts.
    #[must_use]
    pub fn merge_left(&self, other: &JsonObject) -> Self {
        merge::merge_objects(self, other, Priority::Left)
    }

    /// Deep merge keeping `other`'s values on conflicts.
    #[must_use]
    pub fn merge_right(&self, other: &JsonObject) -> Self {
        merge::merge_objects(self, other, Priority::Right)
    }

    /// Applies `f` to a copy of the top-level map and wraps the result.
    ///
    /// Keys returned by `f` are treated as paths, so a dotted key is
    /// expanded into nested objects.
    #[must_use]
    pub fn within<F>(&self, f: F) -> Self
    where
        F: FnOnce(JsonMap) -> JsonMap,
    {
        let mapped = f(self.entries.clone());
        if mapped.keys().any(|key| key.contains(path::SEPARATOR)) {
            Self::from_paths(mapped)
        } else {
            Self::from_entries_unchecked(mapped)
        }
    }

    /// Returns the top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the top-level values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &JsonValue> {
        self.entries.values()
    }

    /// Iterates over top-level entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, JsonValue> {
        self.entries.iter()
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the object has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = (&'a String, &'a JsonValue);
    type IntoIter = indexmap::map::Iter<'a, String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for JsonObject {
    type Item = (String, JsonValue);
    type IntoIter = indexmap::map::IntoIter<String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: AsRef<str>, V: Into<JsonValue>> FromIterator<(K, V)> for JsonObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_paths(iter)
    }
}

/// Builds a [`JsonObject`] from `path => value` pairs.
///
/// ```rust
/// use quarry_json::json_object;
///
/// let object = json_object! {
///     "user.name" => "Alice",
///     "user.age" => 30,
/// };
/// assert_eq!(object.get::<i32>("user.age").unwrap(), 30);
/// ```
#[macro_export]
macro_rules! json_object {
    () => {
        $crate::JsonObject::new()
    };
    ($($path:expr => $value:expr),+ $(,)?) => {
        $crate::JsonObject::from_paths([$(($path, $crate::JsonValue::from($value))),+])
    };
}
