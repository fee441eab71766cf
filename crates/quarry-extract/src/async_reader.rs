//! Asynchronous, failure-typed reader chains.
//!
//! An [`AsyncReader`] extracts a value from a [`ParamSource`] and completes
//! with either the value or a [`ReaderFailure`]. Readers compose with
//! explicit bind-style combinators:
//!
//! - [`AsyncReader::and`] sequences two readers into a pair
//! - [`AsyncReader::and_then`] builds the next stage from the prior output
//! - [`AsyncReader::validate`] applies a named rule to the current value
//! - [`AsyncReader::map`] transforms the current value
//!
//! Stages run strictly in declaration order. The first failure aborts the
//! chain; later stages are never evaluated.
//!
//! # Example
//!
//! ```rust
//! use quarry_extract::{required_int, required_string, AsyncReader, Params, ReaderFailure};
//!
//! # tokio_test::block_on(async {
//! let adult = required_string("name")
//!     .and(required_int("age"))
//!     .validate("adult", |(_, age)| *age > 18);
//!
//! let params = Params::new().with("name", "Alice").with("age", "30");
//! assert_eq!(adult.read(&params).await, Ok(("Alice".to_string(), 30)));
//!
//! let params = Params::new().with("age", "30");
//! assert_eq!(
//!     adult.read(&params).await,
//!     Err(ReaderFailure::param_not_found("name"))
//! );
//! # });
//! ```

use crate::rule::ValidationRule;
use crate::{FromParam, ParamSource, ReadResult, ReaderFailure};
use futures_util::future::{self, BoxFuture, FutureExt};
use std::marker::PhantomData;
use std::sync::Arc;

/// A shareable, type-erased async reader.
pub type BoxedReader<T> = Arc<dyn AsyncReader<Output = T>>;

/// Extracts a value from a [`ParamSource`], asynchronously and with typed
/// failures.
///
/// Readers carry no mutable state; a single instance can serve any number
/// of concurrent reads.
pub trait AsyncReader: Send + Sync {
    /// The extracted value type.
    type Output: Send + 'static;

    /// Reads the value from `source`.
    fn read<'a>(&'a self, source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<Self::Output>>;

    /// Binds the output of this reader to the next stage.
    ///
    /// `f` receives the successful value and returns the reader to run next.
    /// If this reader fails, `f` is never called.
    fn and_then<F, R>(self, f: F) -> AndThen<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> R + Send + Sync,
        R: AsyncReader + 'static,
    {
        AndThen { reader: self, f }
    }

    /// Extends an existing reader with further stages.
    ///
    /// Same as [`AsyncReader::and_then`]; reads better when building a
    /// specialised reader on top of a shared base.
    fn extend<F, R>(self, f: F) -> AndThen<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> R + Send + Sync,
        R: AsyncReader + 'static,
    {
        self.and_then(f)
    }

    /// Runs `next` after this reader, yielding both values.
    fn and<R>(self, next: R) -> And<Self, R>
    where
        Self: Sized,
        R: AsyncReader,
    {
        And { first: self, second: next }
    }

    /// Transforms the extracted value.
    fn map<F, B>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> B + Send + Sync,
        B: Send + 'static,
    {
        Map { reader: self, f }
    }

    /// Fails with `description` unless `predicate` accepts the value.
    fn validate<F>(self, description: impl Into<Arc<str>>, predicate: F) -> Validate<Self>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> bool + Send + Sync + 'static,
    {
        self.validate_with(ValidationRule::new(description, predicate))
    }

    /// Fails unless `rule` holds for the value.
    fn validate_with(self, rule: ValidationRule<Self::Output>) -> Validate<Self>
    where
        Self: Sized,
    {
        Validate { reader: self, rule }
    }

    /// Erases the reader type for storage and sharing.
    fn boxed(self) -> BoxedReader<Self::Output>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl<R: AsyncReader + ?Sized> AsyncReader for &R {
    type Output = R::Output;

    fn read<'a>(&'a self, source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<R::Output>> {
        (**self).read(source)
    }
}

impl<R: AsyncReader + ?Sized> AsyncReader for Box<R> {
    type Output = R::Output;

    fn read<'a>(&'a self, source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<R::Output>> {
        (**self).read(source)
    }
}

impl<R: AsyncReader + ?Sized> AsyncReader for Arc<R> {
    type Output = R::Output;

    fn read<'a>(&'a self, source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<R::Output>> {
        (**self).read(source)
    }
}

// Absent names, empty values and parse failures are told apart here so the
// required and optional readers can treat them differently.
enum Lookup<T> {
    Missing,
    Unparsable,
    Found(T),
}

fn lookup<T: FromParam>(source: &dyn ParamSource, name: &str) -> Lookup<T> {
    match source.lookup_first(name) {
        None | Some("") => Lookup::Missing,
        Some(raw) => T::from_param(raw).map_or(Lookup::Unparsable, Lookup::Found),
    }
}

/// Reader for a parameter that must be present and well-formed.
/// See [`required_param`].
#[derive(Debug)]
pub struct RequiredParam<T> {
    name: Arc<str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RequiredParam<T> {
    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for RequiredParam<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            _marker: PhantomData,
        }
    }
}

impl<T: FromParam> AsyncReader for RequiredParam<T> {
    type Output = T;

    fn read<'a>(&'a self, source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<T>> {
        let result = match lookup::<T>(source, &self.name) {
            Lookup::Found(value) => {
                tracing::trace!(param = %self.name, "required parameter read");
                Ok(value)
            }
            Lookup::Missing => {
                tracing::debug!(param = %self.name, "required parameter missing");
                Err(ReaderFailure::param_not_found(&*self.name))
            }
            Lookup::Unparsable => {
                tracing::debug!(
                    param = %self.name,
                    expected = T::TYPE_NAME,
                    "required parameter unparsable"
                );
                Err(ReaderFailure::unparsable(&self.name, T::TYPE_NAME))
            }
        };
        future::ready(result).boxed()
    }
}

/// Reader for a parameter that may be absent. See [`optional_param`].
#[derive(Debug)]
pub struct OptionalParam<T> {
    name: Arc<str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> OptionalParam<T> {
    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for OptionalParam<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            _marker: PhantomData,
        }
    }
}

impl<T: FromParam> AsyncReader for OptionalParam<T> {
    type Output = Option<T>;

    fn read<'a>(&'a self, source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<Option<T>>> {
        let value = match lookup::<T>(source, &self.name) {
            Lookup::Found(value) => Some(value),
            Lookup::Missing => None,
            Lookup::Unparsable => {
                tracing::trace!(
                    param = %self.name,
                    expected = T::TYPE_NAME,
                    "optional parameter unparsable, treated as absent"
                );
                None
            }
        };
        future::ready(Ok(value)).boxed()
    }
}

/// Reads a required parameter.
///
/// Fails with [`ReaderFailure::ParamNotFound`] if the name is absent or its
/// first value is empty, and with [`ReaderFailure::ValidationFailed`]
/// (`"<name> should be <Type>"`) if the value cannot be parsed.
#[must_use]
pub fn required_param<T: FromParam>(name: impl Into<Arc<str>>) -> RequiredParam<T> {
    RequiredParam {
        name: name.into(),
        _marker: PhantomData,
    }
}

/// Reads an optional parameter.
///
/// Never fails: absent, empty and unparsable values all yield `None`.
#[must_use]
pub fn optional_param<T: FromParam>(name: impl Into<Arc<str>>) -> OptionalParam<T> {
    OptionalParam {
        name: name.into(),
        _marker: PhantomData,
    }
}

/// Required `i32` parameter.
#[must_use]
pub fn required_int(name: impl Into<Arc<str>>) -> RequiredParam<i32> {
    required_param(name)
}

/// Required `i64` parameter.
#[must_use]
pub fn required_long(name: impl Into<Arc<str>>) -> RequiredParam<i64> {
    required_param(name)
}

/// Required `bool` parameter.
#[must_use]
pub fn required_bool(name: impl Into<Arc<str>>) -> RequiredParam<bool> {
    required_param(name)
}

/// Required `String` parameter.
#[must_use]
pub fn required_string(name: impl Into<Arc<str>>) -> RequiredParam<String> {
    required_param(name)
}

/// Optional `i32` parameter.
#[must_use]
pub fn optional_int(name: impl Into<Arc<str>>) -> OptionalParam<i32> {
    optional_param(name)
}

/// Optional `i64` parameter.
#[must_use]
pub fn optional_long(name: impl Into<Arc<str>>) -> OptionalParam<i64> {
    optional_param(name)
}

/// Optional `bool` parameter.
#[must_use]
pub fn optional_bool(name: impl Into<Arc<str>>) -> OptionalParam<bool> {
    optional_param(name)
}

/// Optional `String` parameter.
#[must_use]
pub fn optional_string(name: impl Into<Arc<str>>) -> OptionalParam<String> {
    optional_param(name)
}

/// Reader that always yields a clone of `value`. See [`ready`].
#[derive(Debug, Clone)]
pub struct Ready<T> {
    value: T,
}

impl<T> AsyncReader for Ready<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = T;

    fn read<'a>(&'a self, _source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<T>> {
        future::ready(Ok(self.value.clone())).boxed()
    }
}

/// Lifts a plain value into a reader stage.
#[must_use]
pub fn ready<T>(value: T) -> Ready<T>
where
    T: Clone + Send + Sync + 'static,
{
    Ready { value }
}

/// Reader that always fails. See [`fail`].
#[derive(Debug, Clone)]
pub struct Fail<T> {
    failure: ReaderFailure,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + 'static> AsyncReader for Fail<T> {
    type Output = T;

    fn read<'a>(&'a self, _source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<T>> {
        future::ready(Err(self.failure.clone())).boxed()
    }
}

/// A stage that fails with `failure` without touching the source.
#[must_use]
pub fn fail<T: Send + 'static>(failure: ReaderFailure) -> Fail<T> {
    Fail {
        failure,
        _marker: PhantomData,
    }
}

/// Reader built from a synchronous closure. See [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

impl<F, T> AsyncReader for FromFn<F>
where
    F: Fn(&dyn ParamSource) -> ReadResult<T> + Send + Sync,
    T: Send + 'static,
{
    type Output = T;

    fn read<'a>(&'a self, source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<T>> {
        future::ready((self.f)(source)).boxed()
    }
}

/// Wraps a closure as an [`AsyncReader`].
pub fn from_fn<F, T>(f: F) -> FromFn<F>
where
    F: Fn(&dyn ParamSource) -> ReadResult<T> + Send + Sync,
    T: Send + 'static,
{
    FromFn { f }
}

/// Reader returned by [`AsyncReader::and_then`].
#[derive(Clone)]
pub struct AndThen<A, F> {
    reader: A,
    f: F,
}

impl<A, F, R> AsyncReader for AndThen<A, F>
where
    A: AsyncReader,
    F: Fn(A::Output) -> R + Send + Sync,
    R: AsyncReader + 'static,
{
    type Output = R::Output;

    fn read<'a>(&'a self, source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<R::Output>> {
        async move {
            let value = self.reader.read(source).await?;
            let next = (self.f)(value);
            next.read(source).await
        }
        .boxed()
    }
}

/// Reader returned by [`AsyncReader::and`].
#[derive(Clone)]
pub struct And<A, B> {
    first: A,
    second: B,
}

impl<A, B> AsyncReader for And<A, B>
where
    A: AsyncReader,
    B: AsyncReader,
{
    type Output = (A::Output, B::Output);

    fn read<'a>(&'a self, source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<Self::Output>> {
        async move {
            let first = self.first.read(source).await?;
            let second = self.second.read(source).await?;
            Ok((first, second))
        }
        .boxed()
    }
}

/// Reader returned by [`AsyncReader::map`].
#[derive(Clone)]
pub struct Map<A, F> {
    reader: A,
    f: F,
}

impl<A, F, B> AsyncReader for Map<A, F>
where
    A: AsyncReader,
    F: Fn(A::Output) -> B + Send + Sync,
    B: Send + 'static,
{
    type Output = B;

    fn read<'a>(&'a self, source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<B>> {
        async move {
            let value = self.reader.read(source).await?;
            Ok((self.f)(value))
        }
        .boxed()
    }
}

/// Reader returned by [`AsyncReader::validate`] and [`AsyncReader::validate_with`].
pub struct Validate<A: AsyncReader> {
    reader: A,
    rule: ValidationRule<A::Output>,
}

impl<A: AsyncReader + Clone> Clone for Validate<A> {
    fn clone(&self) -> Self {
        Self {
            reader: self.reader.clone(),
            rule: self.rule.clone(),
        }
    }
}

impl<A: AsyncReader> Validate<A> {
    /// Returns the rule applied by this stage.
    #[must_use]
    pub fn rule(&self) -> &ValidationRule<A::Output> {
        &self.rule
    }
}

impl<A: AsyncReader> AsyncReader for Validate<A> {
    type Output = A::Output;

    fn read<'a>(&'a self, source: &'a dyn ParamSource) -> BoxFuture<'a, ReadResult<A::Output>> {
        async move {
            let value = self.reader.read(source).await?;
            self.rule.evaluate(value)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FailureKind, Params};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn source() -> Params {
        Params::new()
            .with("name", "Alice")
            .with("age", "30")
            .with("big", "9000000000")
            .with("bad", "abc")
            .with("empty", "")
            .with("flag", "false")
    }

    fn counting(calls: &Arc<AtomicUsize>) -> FromFn<impl Fn(&dyn ParamSource) -> ReadResult<i32>> {
        let calls = Arc::clone(calls);
        from_fn(move |_src: &dyn ParamSource| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        })
    }

    #[tokio::test]
    async fn test_required_present() {
        let params = source();

        assert_eq!(required_string("name").read(&params).await, Ok("Alice".to_string()));
        assert_eq!(required_int("age").read(&params).await, Ok(30));
        assert_eq!(required_long("big").read(&params).await, Ok(9_000_000_000));
        assert_eq!(required_bool("flag").read(&params).await, Ok(false));
    }

    #[tokio::test]
    async fn test_required_absent() {
        let result = required_int("missing").read(&source()).await;
        assert_eq!(result, Err(ReaderFailure::param_not_found("missing")));
    }

    #[tokio::test]
    async fn test_required_empty_is_not_found() {
        let result = required_string("empty").read(&source()).await;
        assert_eq!(result, Err(ReaderFailure::param_not_found("empty")));
    }

    #[tokio::test]
    async fn test_required_unparsable() {
        let params = source();

        let failure = required_int("bad").read(&params).await.unwrap_err();
        assert_eq!(failure.kind(), FailureKind::ValidationFailed);
        assert_eq!(failure.description(), Some("bad should be Int"));

        let failure = required_int("big").read(&params).await.unwrap_err();
        assert_eq!(failure.description(), Some("big should be Int"));

        let failure = required_bool("name").read(&params).await.unwrap_err();
        assert_eq!(failure.description(), Some("name should be Boolean"));

        let failure = required_long("bad").read(&params).await.unwrap_err();
        assert_eq!(failure.description(), Some("bad should be Long"));
    }

    #[tokio::test]
    async fn test_optional_never_fails() {
        let params = source();

        assert_eq!(optional_int("age").read(&params).await, Ok(Some(30)));
        assert_eq!(optional_int("missing").read(&params).await, Ok(None));
        assert_eq!(optional_int("bad").read(&params).await, Ok(None));
        assert_eq!(optional_string("empty").read(&params).await, Ok(None));
        assert_eq!(optional_bool("flag").read(&params).await, Ok(Some(false)));
        assert_eq!(optional_long("big").read(&params).await, Ok(Some(9_000_000_000)));
    }

    #[tokio::test]
    async fn test_and_sequences() {
        let reader = required_string("name").and(required_int("age"));
        assert_eq!(reader.read(&source()).await, Ok(("Alice".to_string(), 30)));
    }

    #[tokio::test]
    async fn test_and_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let reader = required_string("missing").and(counting(&calls));

        let result = reader.read(&source()).await;
        assert_eq!(result, Err(ReaderFailure::param_not_found("missing")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_and_then_binds_prior_value() {
        let reader = required_int("age").and_then(|age| ready(age + 1));
        assert_eq!(reader.read(&source()).await, Ok(31));
    }

    #[tokio::test]
    async fn test_and_then_not_called_on_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let reader = required_int("bad").and_then(move |age| {
            seen.fetch_add(1, Ordering::SeqCst);
            ready(age)
        });

        assert!(reader.read(&source()).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_map() {
        let reader = required_int("age").map(|age| age * 2);
        assert_eq!(reader.read(&source()).await, Ok(60));
    }

    #[tokio::test]
    async fn test_validate() {
        let reader = required_int("age").validate("adult", |age| *age > 18);
        assert_eq!(reader.read(&source()).await, Ok(30));

        let reader = required_int("age").validate("senior", |age| *age > 65);
        assert_eq!(
            reader.read(&source()).await,
            Err(ReaderFailure::validation("senior"))
        );
        assert_eq!(reader.rule().description(), "senior");
    }

    #[tokio::test]
    async fn test_ready_and_fail() {
        let params = Params::new();

        assert_eq!(ready(5).read(&params).await, Ok(5));
        assert_eq!(
            fail::<i32>(ReaderFailure::validation("nope")).read(&params).await,
            Err(ReaderFailure::validation("nope"))
        );
    }

    #[tokio::test]
    async fn test_boxed_reader_is_shareable() {
        let reader: BoxedReader<i32> = required_int("age").map(|age| age + 1).boxed();
        let params = source();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let reader = Arc::clone(&reader);
                let params = params.clone();
                tokio::spawn(async move { reader.read(&params).await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), Ok(31));
        }
    }

    #[tokio::test]
    async fn test_reader_names() {
        assert_eq!(required_int("age").name(), "age");
        assert_eq!(optional_int("age").name(), "age");
    }
}
