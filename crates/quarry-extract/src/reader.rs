//! Synchronous, absence-collapsing readers.
//!
//! A [`Reader`] looks a value up in a [`ParamSource`] and yields
//! `Some(value)` or `None`. Every failure mode (absent, empty, unparsable)
//! collapses into `None`; use [`AsyncReader`](crate::AsyncReader) when the
//! caller needs to know why extraction failed.

use crate::{FromParam, ParamSource};
use std::marker::PhantomData;
use std::sync::Arc;

/// Extracts an optional value from a [`ParamSource`].
///
/// Readers are stateless and can be built once and shared freely.
///
/// # Example
///
/// ```rust
/// use quarry_extract::{param, Params, Reader};
///
/// let params = Params::new().with("page", "3").with("q", "rust");
///
/// let page = param::<i32>("page");
/// assert_eq!(page.read(&params), Some(3));
///
/// // Tuples are readers too; every component must be present.
/// let both = (param::<String>("q"), param::<i32>("page"));
/// assert_eq!(both.read(&params), Some(("rust".to_string(), 3)));
///
/// let missing = (param::<String>("q"), param::<i32>("limit"));
/// assert_eq!(missing.read(&params), None);
/// ```
pub trait Reader: Send + Sync {
    /// The extracted value type.
    type Output;

    /// Reads the value from `source`.
    fn read(&self, source: &dyn ParamSource) -> Option<Self::Output>;

    /// Transforms the extracted value.
    fn map<F, B>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> B + Send + Sync,
    {
        Map { reader: self, f }
    }

    /// Combines two readers into a pair. Both are always evaluated.
    fn and<R>(self, other: R) -> (Self, R)
    where
        Self: Sized,
        R: Reader,
    {
        (self, other)
    }

    /// Falls back to `other` when this reader yields nothing.
    fn or<R>(self, other: R) -> Or<Self, R>
    where
        Self: Sized,
        R: Reader<Output = Self::Output>,
    {
        Or { first: self, second: other }
    }

    /// Substitutes `default` when this reader yields nothing.
    fn with_default(self, default: Self::Output) -> WithDefault<Self>
    where
        Self: Sized,
        Self::Output: Clone + Send + Sync,
    {
        WithDefault {
            reader: self,
            default,
        }
    }
}

/// Reader for a single named parameter. See [`param`].
#[derive(Debug)]
pub struct Param<T> {
    name: Arc<str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Param<T> {
    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for Param<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            _marker: PhantomData,
        }
    }
}

impl<T: FromParam> Reader for Param<T> {
    type Output = T;

    fn read(&self, source: &dyn ParamSource) -> Option<T> {
        source.lookup_first(&self.name).and_then(T::from_param)
    }
}

/// Reads the first value of `name` and parses it to `T`.
///
/// Absent names and unparsable values both yield `None`.
#[must_use]
pub fn param<T: FromParam>(name: impl Into<Arc<str>>) -> Param<T> {
    Param {
        name: name.into(),
        _marker: PhantomData,
    }
}

/// Reader built from a closure. See [`reader_fn`].
#[derive(Clone)]
pub struct ReaderFn<F> {
    f: F,
}

impl<F, T> Reader for ReaderFn<F>
where
    F: Fn(&dyn ParamSource) -> Option<T> + Send + Sync,
{
    type Output = T;

    fn read(&self, source: &dyn ParamSource) -> Option<T> {
        (self.f)(source)
    }
}

/// Wraps a closure as a [`Reader`].
pub fn reader_fn<F, T>(f: F) -> ReaderFn<F>
where
    F: Fn(&dyn ParamSource) -> Option<T> + Send + Sync,
{
    ReaderFn { f }
}

/// Reader returned by [`Reader::map`].
#[derive(Clone)]
pub struct Map<R, F> {
    reader: R,
    f: F,
}

impl<R, F, B> Reader for Map<R, F>
where
    R: Reader,
    F: Fn(R::Output) -> B + Send + Sync,
{
    type Output = B;

    fn read(&self, source: &dyn ParamSource) -> Option<B> {
        self.reader.read(source).map(&self.f)
    }
}

/// Reader returned by [`Reader::or`].
#[derive(Clone)]
pub struct Or<A, B> {
    first: A,
    second: B,
}

impl<A, B> Reader for Or<A, B>
where
    A: Reader,
    B: Reader<Output = A::Output>,
{
    type Output = A::Output;

    fn read(&self, source: &dyn ParamSource) -> Option<A::Output> {
        self.first.read(source).or_else(|| self.second.read(source))
    }
}

/// Reader returned by [`Reader::with_default`].
pub struct WithDefault<R: Reader> {
    reader: R,
    default: R::Output,
}

impl<R> Clone for WithDefault<R>
where
    R: Reader + Clone,
    R::Output: Clone,
{
    fn clone(&self) -> Self {
        Self {
            reader: self.reader.clone(),
            default: self.default.clone(),
        }
    }
}

impl<R> Reader for WithDefault<R>
where
    R: Reader,
    R::Output: Clone + Send + Sync,
{
    type Output = R::Output;

    fn read(&self, source: &dyn ParamSource) -> Option<R::Output> {
        Some(
            self.reader
                .read(source)
                .unwrap_or_else(|| self.default.clone()),
        )
    }
}

impl<R: Reader + ?Sized> Reader for &R {
    type Output = R::Output;

    fn read(&self, source: &dyn ParamSource) -> Option<R::Output> {
        (**self).read(source)
    }
}

impl<R: Reader + ?Sized> Reader for Box<R> {
    type Output = R::Output;

    fn read(&self, source: &dyn ParamSource) -> Option<R::Output> {
        (**self).read(source)
    }
}

impl<R: Reader + ?Sized> Reader for Arc<R> {
    type Output = R::Output;

    fn read(&self, source: &dyn ParamSource) -> Option<R::Output> {
        (**self).read(source)
    }
}

// Every component is read before combining, so no reader is skipped.
macro_rules! impl_reader_for_tuple {
    ($($T:ident => $idx:tt),*) => {
        impl<$($T: Reader),*> Reader for ($($T,)*) {
            type Output = ($($T::Output,)*);

            fn read(&self, source: &dyn ParamSource) -> Option<Self::Output> {
                let values = ($(self.$idx.read(source),)*);
                Some(($(values.$idx?,)*))
            }
        }
    };
}

impl_reader_for_tuple!(T1 => 0);
impl_reader_for_tuple!(T1 => 0, T2 => 1);
impl_reader_for_tuple!(T1 => 0, T2 => 1, T3 => 2);
impl_reader_for_tuple!(T1 => 0, T2 => 1, T3 => 2, T4 => 3);
impl_reader_for_tuple!(T1 => 0, T2 => 1, T3 => 2, T4 => 3, T5 => 4);
impl_reader_for_tuple!(T1 => 0, T2 => 1, T3 => 2, T4 => 3, T5 => 4, T6 => 5);
