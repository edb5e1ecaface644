//! Execution shim over a compiled mutator.
//!
//! A [`Sanitizer`] offers two ways to run a pipeline: [`Sanitizer::sanitize_async`]
//! for callers already inside an async context, and [`Sanitizer::sanitize`],
//! which drives the same future to completion on the calling thread.

use crate::builder::PipelineBuilder;
use crate::error::Result;
use crate::mutator::CompiledMutator;
use crate::registry::SanitizerRegistry;
use futures::future::BoxFuture;
use std::fmt;

/// Runs a compiled pipeline against values of type `T`.
pub struct Sanitizer<T> {
    mutator: CompiledMutator<T>,
}

impl<T: Send + 'static> Sanitizer<T> {
    /// Wrap an already compiled mutator.
    pub fn from_mutator(mutator: CompiledMutator<T>) -> Self {
        Self { mutator }
    }

    /// A sanitizer that leaves values unchanged.
    pub fn no_op() -> Self {
        Self::from_mutator(CompiledMutator::no_op())
    }

    /// Configure a pipeline for `T` and return its sanitizer.
    ///
    /// The pipeline is registered in a registry holding only `T` and
    /// fetched back from it.
    pub fn create<F>(configure: F) -> Result<Self>
    where
        F: FnOnce(&PipelineBuilder<T>) -> Result<()>,
    {
        SanitizerRegistry::configure(|registry| {
            registry.configure::<T, _>(configure)?;
            Ok(())
        })?
        .sanitizer::<T>()
    }

    /// Sanitizer with a single infallible transformation.
    pub fn from_fn<F>(visitor: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        let builder = PipelineBuilder::new();
        builder.transform(visitor);
        Self::from_mutator(builder.build())
    }

    /// Sanitizer with a single fallible transformation.
    pub fn try_from_fn<F>(visitor: F) -> Self
    where
        F: Fn(&mut T) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let builder = PipelineBuilder::new();
        builder.try_transform(visitor);
        Self::from_mutator(builder.build())
    }

    /// Sanitizer with a single suspendable transformation.
    pub fn from_async<F>(visitor: F) -> Self
    where
        F: for<'a> Fn(&'a mut T) -> BoxFuture<'a, anyhow::Result<()>> + Send + Sync + 'static,
    {
        let builder = PipelineBuilder::new();
        builder.transform_async(visitor);
        Self::from_mutator(builder.build())
    }

    /// Run the pipeline, suspending whenever a step suspends.
    ///
    /// The first failing step ends the run and its error is returned as-is.
    pub async fn sanitize_async(&self, value: &mut T) -> anyhow::Result<()> {
        self.mutator.run(value).await
    }

    /// Run the pipeline and block the calling thread until it completes.
    ///
    /// No other thread or runtime is involved. Steps that depend on a tokio
    /// reactor (timers, sockets) need [`Sanitizer::sanitize_async`] instead.
    pub fn sanitize(&self, value: &mut T) -> anyhow::Result<()> {
        futures::executor::block_on(self.sanitize_async(value))
    }

    /// The compiled pipeline.
    pub fn mutator(&self) -> &CompiledMutator<T> {
        &self.mutator
    }
}

impl<T> Clone for Sanitizer<T> {
    fn clone(&self) -> Self {
        Self {
            mutator: self.mutator.clone(),
        }
    }
}

impl<T> fmt::Debug for Sanitizer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sanitizer")
            .field("mutator", &self.mutator)
            .finish()
    }
}
