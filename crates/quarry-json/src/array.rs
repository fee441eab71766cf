//! JSON arrays.

use crate::JsonValue;

/// An ordered sequence of JSON values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonArray {
    items: Vec<JsonValue>,
}

impl JsonArray {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the items as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[JsonValue] {
        &self.items
    }

    /// Returns the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&JsonValue> {
        self.items.get(index)
    }

    /// Returns a new array holding this array's items followed by `other`'s.
    #[must_use]
    pub fn concat(&self, other: &JsonArray) -> Self {
        let mut items = Vec::with_capacity(self.len() + other.len());
        items.extend_from_slice(&self.items);
        items.extend_from_slice(&other.items);
        Self { items }
    }

    /// Applies `f` to a copy of the items and wraps the result.
    #[must_use]
    pub fn within<F>(&self, f: F) -> Self
    where
        F: FnOnce(Vec<JsonValue>) -> Vec<JsonValue>,
    {
        Self {
            items: f(self.items.clone()),
        }
    }

    /// Iterates over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, JsonValue> {
        self.items.iter()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the array has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<JsonValue>> for JsonArray {
    fn from(items: Vec<JsonValue>) -> Self {
        Self { items }
    }
}

impl From<JsonArray> for Vec<JsonValue> {
    fn from(array: JsonArray) -> Self {
        array.items
    }
}

impl<V: Into<JsonValue>> FromIterator<V> for JsonArray {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a JsonArray {
    type Item = &'a JsonValue;
    type IntoIter = std::slice::Iter<'a, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for JsonArray {
    type Item = JsonValue;
    type IntoIter = std::vec::IntoIter<JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat() {
        let first: JsonArray = [1, 2, 3].into_iter().collect();
        let second: JsonArray = [4, 5, 6].into_iter().collect();

        let joined = first.concat(&second);

        let expected: JsonArray = (1..=6).collect();
        assert_eq!(joined, expected);
        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 3);
    }

    #[test]
    fn test_concat_with_empty() {
        let items: JsonArray = ["a"].into_iter().collect();
        assert_eq!(items.concat(&JsonArray::new()), items);
        assert_eq!(JsonArray::new().concat(&items), items);
    }

    #[test]
    fn test_within() {
        let items: JsonArray = [1, 2, 3].into_iter().collect();
        let reversed = items.within(|mut values| {
            values.reverse();
            values
        });

        assert_eq!(reversed.get(0), Some(&JsonValue::from(3)));
        assert_eq!(items.get(0), Some(&JsonValue::from(1)));
        assert_eq!(items.within(|values| values), items);
    }

    #[test]
    fn test_order_matters_for_equality() {
        let first: JsonArray = [1, 2].into_iter().collect();
        let second: JsonArray = [2, 1].into_iter().collect();
        assert_ne!(first, second);
    }
}
