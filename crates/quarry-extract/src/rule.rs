//! Named validation rules.
//!
//! A [`ValidationRule`] pairs a human-readable description with a predicate.
//! When the predicate rejects a value the description becomes the payload of
//! [`ReaderFailure::ValidationFailed`].

use crate::async_reader::AsyncReader;
use crate::{ParamSource, ReadResult, ReaderFailure};
use futures_util::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::sync::Arc;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

struct Check<T> {
    description: Arc<str>,
    predicate: Predicate<T>,
}

impl<T> Clone for Check<T> {
    fn clone(&self) -> Self {
        Self {
            description: Arc::clone(&self.description),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

/// A described predicate over an extracted value.
///
/// Rules are cheap to clone and can be shared between any number of reader
/// chains.
///
/// # Example
///
/// ```rust
/// use quarry_extract::{validation_rule, FailureKind};
///
/// let adult = validation_rule("adult").check(|age: &i32| *age > 18);
///
/// assert_eq!(adult.evaluate(30), Ok(30));
/// let failure = adult.evaluate(12).unwrap_err();
/// assert_eq!(failure.kind(), FailureKind::ValidationFailed);
/// assert_eq!(failure.description(), Some("adult"));
/// ```
pub struct ValidationRule<T> {
    checks: Vec<Check<T>>,
}

impl<T> Clone for ValidationRule<T> {
    fn clone(&self) -> Self {
        Self {
            checks: self.checks.clone(),
        }
    }
}

impl<T> fmt::Debug for ValidationRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("description", &self.description())
            .finish_non_exhaustive()
    }
}

impl<T> ValidationRule<T> {
    /// Creates a rule from a description and predicate.
    pub fn new<F>(description: impl Into<Arc<str>>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            checks: vec![Check {
                description: description.into(),
                predicate: Arc::new(predicate),
            }],
        }
    }

    /// Returns the rule description; combined rules join theirs with `" and "`.
    #[must_use]
    pub fn description(&self) -> String {
        self.checks
            .iter()
            .map(|c| c.description.as_ref())
            .collect::<Vec<_>>()
            .join(" and ")
    }

    /// Returns true if `value` satisfies every check.
    #[must_use]
    pub fn holds(&self, value: &T) -> bool {
        self.first_violation(value).is_none()
    }

    /// Passes `value` through when it satisfies the rule.
    ///
    /// Fails with the description of the first violated check.
    pub fn evaluate(&self, value: T) -> ReadResult<T> {
        match self.first_violation(&value) {
            None => Ok(value),
            Some(description) => {
                tracing::debug!(rule = %description, "validation rule failed");
                Err(ReaderFailure::validation(description))
            }
        }
    }

    /// Combines two rules; both must hold, checked in order.
    #[must_use]
    pub fn and(mut self, other: ValidationRule<T>) -> Self {
        self.checks.extend(other.checks);
        self
    }

    /// Builds a reader stage that re-emits `value` if it satisfies the rule.
    #[must_use]
    pub fn on(&self, value: T) -> Checked<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        Checked {
            rule: self.clone(),
            value,
        }
    }

    fn first_violation(&self, value: &T) -> Option<&str> {
        self.checks
            .iter()
            .find(|c| !(c.predicate)(value))
            .map(|c| c.description.as_ref())
    }
}

/// Named rule awaiting its predicate. See [`validation_rule`].
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    description: Arc<str>,
}

impl RuleBuilder {
    /// Attaches the predicate, producing the rule.
    pub fn check<T, F>(self, predicate: F) -> ValidationRule<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        ValidationRule::new(self.description, predicate)
    }
}

/// Starts a rule with the given description: `validation_rule("adult").check(|age| ...)`.
#[must_use]
pub fn validation_rule(description: impl Into<Arc<str>>) -> RuleBuilder {
    RuleBuilder {
        description: description.into(),
    }
}

/// Reader stage produced by [`ValidationRule::on`].
///
/// Ignores the source; yields the captured value or the rule's failure.
#[derive(Debug, Clone)]
pub struct Checked<T> {
    rule: ValidationRule<T>,
    value: T,
}

impl<T> AsyncReader for Checked<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = T;

    fn read<'a>(&'a self, _source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<T>> {
        future::ready(self.rule.evaluate(self.value.clone())).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FailureKind, Params};

    #[test]
    fn test_rule_passes_value_through() {
        let rule = ValidationRule::new("positive", |n: &i32| *n > 0);
        assert_eq!(rule.evaluate(5), Ok(5));
        assert!(rule.holds(&5));
    }

    #[test]
    fn test_rule_failure_carries_description() {
        let rule = validation_rule("positive").check(|n: &i32| *n > 0);
        let failure = rule.evaluate(-1).unwrap_err();

        assert_eq!(failure.kind(), FailureKind::ValidationFailed);
        assert_eq!(failure.description(), Some("positive"));
    }

    #[test]
    fn test_combined_rule_reports_first_violation() {
        let rule = validation_rule("at least 18")
            .check(|n: &i32| *n >= 18)
            .and(validation_rule("at most 65").check(|n: &i32| *n <= 65));

        assert_eq!(rule.description(), "at least 18 and at most 65");
        assert_eq!(rule.evaluate(30), Ok(30));
        assert_eq!(
            rule.evaluate(70),
            Err(ReaderFailure::validation("at most 65"))
        );
        assert_eq!(
            rule.evaluate(10),
            Err(ReaderFailure::validation("at least 18"))
        );
    }

    #[test]
    fn test_rule_debug() {
        let rule = validation_rule("non-empty").check(|s: &String| !s.is_empty());
        assert!(format!("{rule:?}").contains("non-empty"));
    }

    #[tokio::test]
    async fn test_checked_stage() {
        let rule = validation_rule("even").check(|n: &i32| n % 2 == 0);
        let params = Params::new();

        assert_eq!(rule.on(4).read(&params).await, Ok(4));
        assert_eq!(
            rule.on(3).read(&params).await,
            Err(ReaderFailure::validation("even"))
        );
    }
}
