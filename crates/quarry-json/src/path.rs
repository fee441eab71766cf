//! Dotted paths.
//!
//! A path such as `"a.b.c"` names a nested location. The separator always
//! splits: a key that itself contains `.` cannot be addressed, and empty
//! segments (`"a..b"`) name the empty key.

use crate::{JsonError, JsonObject, JsonResult, JsonValue};

/// Path segment separator.
pub const SEPARATOR: char = '.';

/// Returns the first segment of a path.
pub(crate) fn first_segment(path: &str) -> &str {
    path.split(SEPARATOR).next().unwrap_or(path)
}

/// Builds the single-branch object that places `value` at `path`.
///
/// Folds right to left: `"a.b.c" -> v` becomes `{a: {b: {c: v}}}`.
pub(crate) fn nest(path: &str, value: JsonValue) -> JsonObject {
    let mut segments = path.rsplit(SEPARATOR);
    let innermost = segments.next().unwrap_or(path);
    segments.fold(JsonObject::single(innermost, value), |inner, segment| {
        JsonObject::single(segment, JsonValue::Object(inner))
    })
}

/// Walks `path` from `root`, descending through objects only.
pub(crate) fn resolve<'a>(root: &'a JsonObject, path: &str) -> JsonResult<&'a JsonValue> {
    let mut segments = path.split(SEPARATOR);
    let first = segments.next().unwrap_or(path);
    let mut current = root
        .get_key(first)
        .ok_or_else(|| missing(path, first))?;

    for segment in segments {
        current = match current {
            JsonValue::Object(object) => object
                .get_key(segment)
                .ok_or_else(|| missing(path, segment))?,
            other => {
                return Err(JsonError::NotAnObject {
                    path: path.to_string(),
                    segment: segment.to_string(),
                    found: other.kind(),
                })
            }
        };
    }

    Ok(current)
}

fn missing(path: &str, segment: &str) -> JsonError {
    JsonError::MissingSegment {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueKind;

    #[test]
    fn test_nest_single_segment() {
        let object = nest("a", JsonValue::from(1));
        assert_eq!(object.len(), 1);
        assert_eq!(object.get_key("a"), Some(&JsonValue::from(1)));
    }

    #[test]
    fn test_nest_deep() {
        let object = nest("a.b.c", JsonValue::from(1));
        let b = object.get_key("a").and_then(JsonValue::as_object).unwrap();
        let c = b.get_key("b").and_then(JsonValue::as_object).unwrap();
        assert_eq!(c.get_key("c"), Some(&JsonValue::from(1)));
    }

    #[test]
    fn test_nest_empty_segments() {
        let object = nest("a..b", JsonValue::from(1));
        assert_eq!(resolve(&object, "a..b").unwrap(), &JsonValue::from(1));

        let object = nest("", JsonValue::from(2));
        assert_eq!(object.get_key(""), Some(&JsonValue::from(2)));
    }

    #[test]
    fn test_resolve_missing_first_segment() {
        let object = nest("a.b", JsonValue::from(1));
        let err = resolve(&object, "x.b").unwrap_err();
        assert!(matches!(err, JsonError::MissingSegment { ref segment, .. } if segment == "x"));
    }

    #[test]
    fn test_resolve_missing_inner_segment() {
        let object = nest("a.b", JsonValue::from(1));
        let err = resolve(&object, "a.c").unwrap_err();
        assert!(matches!(err, JsonError::MissingSegment { ref segment, .. } if segment == "c"));
    }

    #[test]
    fn test_resolve_through_scalar() {
        let object = nest("a.b", JsonValue::from(1));
        let err = resolve(&object, "a.b.c").unwrap_err();
        assert!(matches!(
            err,
            JsonError::NotAnObject {
                ref segment,
                found: ValueKind::Number,
                ..
            } if segment == "c"
        ));
    }

    #[test]
    fn test_resolve_does_not_index_arrays() {
        let object = nest("a", JsonValue::array([1, 2]));
        let err = resolve(&object, "a.0").unwrap_err();
        assert!(matches!(
            err,
            JsonError::NotAnObject {
                found: ValueKind::Array,
                ..
            }
        ));
    }

    #[test]
    fn test_first_segment() {
        assert_eq!(first_segment("a.b"), "a");
        assert_eq!(first_segment("a"), "a");
        assert_eq!(first_segment(""), "");
    }
}
