//! Typed parsing of raw parameter strings.
//!
//! [`FromParam`] converts a single raw value into one of the supported
//! target types. Parsing is total: any lexical mismatch yields `None`,
//! which readers then treat as absence or as a validation failure.

/// Types that can be parsed from a raw parameter string.
///
/// # Example
///
/// ```rust
/// use quarry_extract::FromParam;
///
/// assert_eq!(i32::from_param("42"), Some(42));
/// assert_eq!(i32::from_param("abc"), None);
/// assert_eq!(bool::from_param("true"), Some(true));
/// assert_eq!(bool::from_param("TRUE"), None);
/// assert_eq!(<i64 as FromParam>::TYPE_NAME, "Long");
/// ```
pub trait FromParam: Sized + Send + Sync + 'static {
    /// Name of the target type used in failure descriptions.
    const TYPE_NAME: &'static str;

    /// Parses a raw value, returning `None` on any mismatch.
    fn from_param(raw: &str) -> Option<Self>;
}

impl FromParam for i32 {
    const TYPE_NAME: &'static str = "Int";

    fn from_param(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FromParam for i64 {
    const TYPE_NAME: &'static str = "Long";

    fn from_param(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FromParam for bool {
    const TYPE_NAME: &'static str = "Boolean";

    // Exactly the two lowercase literals; "True", "1" and "yes" are rejected.
    fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl FromParam for String {
    const TYPE_NAME: &'static str = "String";

    fn from_param(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// Parses `raw` into `T`.
#[must_use]
pub fn parse<T: FromParam>(raw: &str) -> Option<T> {
    T::from_param(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse::<i32>("10"), Some(10));
        assert_eq!(parse::<i32>("-7"), Some(-7));
        assert_eq!(parse::<i32>("+7"), Some(7));
        assert_eq!(parse::<i32>(" 7"), None);
        assert_eq!(parse::<i32>("7.5"), None);
        assert_eq!(parse::<i32>(""), None);
    }

    #[test]
    fn test_parse_int_overflow() {
        assert_eq!(parse::<i32>("2147483647"), Some(i32::MAX));
        assert_eq!(parse::<i32>("2147483648"), None);
        assert_eq!(parse::<i64>("2147483648"), Some(2_147_483_648));
    }

    #[test]
    fn test_parse_long() {
        assert_eq!(parse::<i64>("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse::<i64>("9223372036854775808"), None);
        assert_eq!(parse::<i64>("abc"), None);
    }

    #[test]
    fn test_parse_bool_literals() {
        assert_eq!(parse::<bool>("true"), Some(true));
        assert_eq!(parse::<bool>("false"), Some(false));
        assert_eq!(parse::<bool>("True"), None);
        assert_eq!(parse::<bool>("1"), None);
        assert_eq!(parse::<bool>("yes"), None);
        assert_eq!(parse::<bool>(""), None);
    }

    #[test]
    fn test_parse_string_passthrough() {
        assert_eq!(parse::<String>("hello"), Some("hello".to_string()));
        assert_eq!(parse::<String>(""), Some(String::new()));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(i32::TYPE_NAME, "Int");
        assert_eq!(i64::TYPE_NAME, "Long");
        assert_eq!(bool::TYPE_NAME, "Boolean");
        assert_eq!(String::TYPE_NAME, "String");
    }
}
