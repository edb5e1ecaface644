//! The transformation contract.
//!
//! A [`Transform`] mutates a value in place and may suspend while doing so.
//! Closures are adapted with [`FnTransform`], [`TryFnTransform`] and
//! [`AsyncFnTransform`]; pre-built transformations implement the trait
//! directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use hygiene_core::Transform;
//! use async_trait::async_trait;
//!
//! struct Uppercase;
//!
//! #[async_trait]
//! impl Transform<String> for Uppercase {
//!     fn name(&self) -> &str { "uppercase" }
//!
//!     async fn apply(&self, value: &mut String) -> anyhow::Result<()> {
//!         *value = value.to_uppercase();
//!         Ok(())
//!     }
//! }
//! ```

use async_trait::async_trait;
use futures::future::BoxFuture;
use std::any::type_name;
use std::marker::PhantomData;

/// A unit of work that mutates a `T` in place.
///
/// Errors returned from `apply` reach the caller of the sanitizer unchanged.
#[async_trait]
pub trait Transform<T>: Send + Sync {
    /// Name used in trace output.
    fn name(&self) -> &str {
        type_name::<Self>()
    }

    /// Mutate the value.
    async fn apply(&self, value: &mut T) -> anyhow::Result<()>;
}

/// Infallible, synchronous in-place transformation.
pub struct FnTransform<T, F> {
    f: F,
    _value: PhantomData<fn(&mut T)>,
}

impl<T, F> FnTransform<T, F>
where
    F: Fn(&mut T) + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _value: PhantomData,
        }
    }
}

#[async_trait]
impl<T, F> Transform<T> for FnTransform<T, F>
where
    T: Send,
    F: Fn(&mut T) + Send + Sync,
{
    fn name(&self) -> &str {
        "fn"
    }

    async fn apply(&self, value: &mut T) -> anyhow::Result<()> {
        (self.f)(value);
        Ok(())
    }
}

/// Fallible, synchronous in-place transformation.
pub struct TryFnTransform<T, F> {
    f: F,
    _value: PhantomData<fn(&mut T)>,
}

impl<T, F> TryFnTransform<T, F>
where
    F: Fn(&mut T) -> anyhow::Result<()> + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _value: PhantomData,
        }
    }
}

#[async_trait]
impl<T, F> Transform<T> for TryFnTransform<T, F>
where
    T: Send,
    F: Fn(&mut T) -> anyhow::Result<()> + Send + Sync,
{
    fn name(&self) -> &str {
        "try_fn"
    }

    async fn apply(&self, value: &mut T) -> anyhow::Result<()> {
        (self.f)(value)
    }
}

/// Suspendable in-place transformation.
///
/// The closure borrows the value for the lifetime of the returned future:
///
/// ```rust,ignore
/// use futures::FutureExt;
///
/// let step = AsyncFnTransform::new(|value: &mut String| {
///     async move {
///         let looked_up = lookup(value).await?;
///         *value = looked_up;
///         Ok(())
///     }
///     .boxed()
/// });
/// ```
pub struct AsyncFnTransform<T, F> {
    f: F,
    _value: PhantomData<fn(&mut T)>,
}

impl<T, F> AsyncFnTransform<T, F> {
    /// Wrap a closure.
    pub fn new(f: F) -> Self
    where
        F: for<'a> Fn(&'a mut T) -> BoxFuture<'a, anyhow::Result<()>> + Send + Sync,
    {
        Self {
            f,
            _value: PhantomData,
        }
    }
}

#[async_trait]
impl<T, F> Transform<T> for AsyncFnTransform<T, F>
where
    T: Send,
    F: for<'a> Fn(&'a mut T) -> BoxFuture<'a, anyhow::Result<()>> + Send + Sync,
{
    fn name(&self) -> &str {
        "async_fn"
    }

    async fn apply(&self, value: &mut T) -> anyhow::Result<()> {
        (self.f)(value).await
    }
}
