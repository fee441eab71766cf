//! Ordered multi-valued parameter storage.
//!
//! [`Params`] is the default [`ParamSource`]: a list of `(name, value)` pairs
//! in arrival order, using a small-vector to avoid heap allocation for
//! requests with only a handful of parameters.

use crate::{ParamSource, SourceError};
use http::Uri;
use smallvec::SmallVec;

/// Maximum number of parameters stored inline (stack allocated).
const INLINE_PARAMS: usize = 8;

/// Default maximum raw query/form length (8 KiB).
const DEFAULT_MAX_QUERY_LENGTH: usize = 8 * 1024;

/// Default maximum number of decoded pairs.
const DEFAULT_MAX_PAIRS: usize = 256;

/// Bounds applied when decoding raw query strings and form bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamLimits {
    /// Maximum raw input length in bytes.
    pub max_query_length: usize,
    /// Maximum number of decoded `(name, value)` pairs.
    pub max_pairs: usize,
}

impl Default for ParamLimits {
    fn default() -> Self {
        Self {
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
            max_pairs: DEFAULT_MAX_PAIRS,
        }
    }
}

impl ParamLimits {
    /// Limits that accept any input.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_query_length: usize::MAX,
            max_pairs: usize::MAX,
        }
    }
}

/// Request parameters as ordered `(name, value)` pairs.
///
/// A name may appear several times; [`ParamSource::lookup_all`] returns the
/// values in the order they were pushed.
///
/// # Example
///
/// ```rust
/// use quarry_extract::{ParamSource, Params};
///
/// let params = Params::from_query("tag=a&tag=b&q=rust+lang").unwrap();
///
/// assert_eq!(params.lookup_all("tag"), vec!["a", "b"]);
/// assert_eq!(params.get("q"), Some("rust lang"));
/// assert_eq!(params.get("unknown"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates a new empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parameter set with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: SmallVec::with_capacity(capacity),
        }
    }

    /// Decodes a URL query string using the default [`ParamLimits`].
    ///
    /// A leading `?` is ignored.
    pub fn from_query(query: &str) -> Result<Self, SourceError> {
        Self::from_query_with_limits(query, &ParamLimits::default())
    }

    /// Decodes a URL query string, enforcing `limits`.
    pub fn from_query_with_limits(query: &str, limits: &ParamLimits) -> Result<Self, SourceError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::decode(query.as_bytes(), limits)
    }

    /// Decodes the query component of `uri`; a URI without one yields no params.
    pub fn from_uri(uri: &Uri) -> Result<Self, SourceError> {
        uri.query().map_or_else(|| Ok(Self::new()), Self::from_query)
    }

    /// Decodes an `application/x-www-form-urlencoded` body.
    pub fn from_form(body: &[u8]) -> Result<Self, SourceError> {
        Self::decode(body, &ParamLimits::default())
    }

    /// Decodes an `application/x-www-form-urlencoded` body, enforcing `limits`.
    pub fn from_form_with_limits(body: &[u8], limits: &ParamLimits) -> Result<Self, SourceError> {
        Self::decode(body, limits)
    }

    fn decode(raw: &[u8], limits: &ParamLimits) -> Result<Self, SourceError> {
        if raw.len() > limits.max_query_length {
            return Err(SourceError::TooLarge {
                max: limits.max_query_length,
                actual: raw.len(),
            });
        }

        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(raw)
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        if pairs.len() > limits.max_pairs {
            return Err(SourceError::TooManyPairs {
                max: limits.max_pairs,
                actual: pairs.len(),
            });
        }

        Ok(pairs.into_iter().collect())
    }

    /// Adds a parameter value; existing values for the name are kept.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Adds a parameter value, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Returns the first value for a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns all values for a parameter by name, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.inner
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Removes every value recorded for `name`, returning how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.inner.len();
        self.inner.retain(|(n, _)| n != name);
        before - self.inner.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of `(name, value)` pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over the pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Clears all parameters, retaining allocated capacity.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl ParamSource for Params {
    fn lookup_all(&self, name: &str) -> Vec<&str> {
        self.inner
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    fn lookup_first(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(|(n, v)| (n.into(), v.into())).collect(),
        }
    }
}

impl<N: Into<String>, V: Into<String>> Extend<(N, V)> for Params {
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, iter: I) {
        self.inner
            .extend(iter.into_iter().map(|(n, v)| (n.into(), v.into())));
    }
}
