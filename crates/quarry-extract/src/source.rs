//! Raw parameter sources.
//!
//! A [`ParamSource`] is the read-only, string-keyed, multi-valued view of a
//! request's parameters that readers consult. It is supplied by whatever
//! owns the request; this crate only reads from it.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Read-only lookup of raw parameter values by name.
///
/// Implementations return every value recorded for `name` in order. Readers
/// only ever consult the first one.
///
/// # Implementing `ParamSource`
///
/// ```rust
/// use quarry_extract::ParamSource;
///
/// struct Single(&'static str, &'static str);
///
/// impl ParamSource for Single {
///     fn lookup_all(&self, name: &str) -> Vec<&str> {
///         if name == self.0 { vec![self.1] } else { Vec::new() }
///     }
/// }
///
/// let source = Single("id", "7");
/// assert_eq!(source.lookup_first("id"), Some("7"));
/// assert!(source.lookup_all("other").is_empty());
/// ```
pub trait ParamSource: Send + Sync {
    /// Returns all raw values for `name`, empty when absent.
    fn lookup_all(&self, name: &str) -> Vec<&str>;

    /// Returns the first raw value for `name`, if any.
    fn lookup_first(&self, name: &str) -> Option<&str> {
        self.lookup_all(name).into_iter().next()
    }

    /// Returns true if at least one value is recorded for `name`.
    fn contains(&self, name: &str) -> bool {
        self.lookup_first(name).is_some()
    }
}

impl<S: ParamSource + ?Sized> ParamSource for &S {
    fn lookup_all(&self, name: &str) -> Vec<&str> {
        (**self).lookup_all(name)
    }
}

impl<S: ParamSource + ?Sized> ParamSource for Box<S> {
    fn lookup_all(&self, name: &str) -> Vec<&str> {
        (**self).lookup_all(name)
    }
}

impl<S: ParamSource + ?Sized> ParamSource for Arc<S> {
    fn lookup_all(&self, name: &str) -> Vec<&str> {
        (**self).lookup_all(name)
    }
}

impl<S: std::hash::BuildHasher + Send + Sync> ParamSource for HashMap<String, Vec<String>, S> {
    fn lookup_all(&self, name: &str) -> Vec<&str> {
        self.get(name)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl ParamSource for BTreeMap<String, Vec<String>> {
    fn lookup_all(&self, name: &str) -> Vec<&str> {
        self.get(name)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_source() -> HashMap<String, Vec<String>> {
        let mut map = HashMap::new();
        map.insert("tag".to_string(), vec!["a".to_string(), "b".to_string()]);
        map.insert("empty".to_string(), Vec::new());
        map
    }

    #[test]
    fn test_hash_map_lookup() {
        let source = map_source();

        assert_eq!(source.lookup_all("tag"), vec!["a", "b"]);
        assert_eq!(source.lookup_first("tag"), Some("a"));
        assert!(source.lookup_all("missing").is_empty());
    }

    #[test]
    fn test_empty_value_list_is_absent() {
        let source = map_source();

        assert_eq!(source.lookup_first("empty"), None);
        assert!(!source.contains("empty"));
    }

    #[test]
    fn test_btree_map_lookup() {
        let mut source = BTreeMap::new();
        source.insert("id".to_string(), vec!["1".to_string()]);

        assert_eq!(source.lookup_first("id"), Some("1"));
        assert!(source.contains("id"));
    }

    #[test]
    fn test_blanket_impls() {
        let source = map_source();
        let by_ref: &dyn ParamSource = &source;
        let shared: Arc<dyn ParamSource> = Arc::new(map_source());

        assert_eq!(by_ref.lookup_first("tag"), Some("a"));
        assert_eq!(shared.lookup_first("tag"), Some("a"));
        assert_eq!((&shared).lookup_all("tag").len(), 2);
    }
}
