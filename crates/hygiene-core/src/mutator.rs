//! Compiled mutators.
//!
//! A [`CompiledMutator`] is the frozen output of
//! [`PipelineBuilder::build`](crate::PipelineBuilder::build). It runs a node's
//! own transformations in registration order, then one bridge per registered
//! field, also in registration order.
//!
//! ## Bridging
//!
//! For a field path `a.b` the bridge does:
//!
//! ```text
//! read a from root      -> x
//! read b from x         -> leaf
//! run child mutator on leaf
//! write leaf into x.b
//! write x into root.a
//! ```
//!
//! A path of depth N costs exactly N reads and N writes. The write-back also
//! happens when the child fails, so whatever the child applied before failing
//! is kept; the child's error is returned afterwards.

use crate::field::ErasedValue;
use crate::path::FieldChain;
use crate::transform::Transform;
use crate::Error;
use async_trait::async_trait;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Executable composition of a builder's transformations and field bridges.
pub struct CompiledMutator<T> {
    transforms: Arc<[Arc<dyn Transform<T>>]>,
    bridges: Arc<[Arc<dyn Transform<T>>]>,
}

impl<T: Send + 'static> CompiledMutator<T> {
    pub(crate) fn new(
        transforms: Vec<Arc<dyn Transform<T>>>,
        bridges: Vec<Arc<dyn Transform<T>>>,
    ) -> Self {
        Self {
            transforms: transforms.into(),
            bridges: bridges.into(),
        }
    }

    /// A mutator that leaves every value unchanged.
    pub fn no_op() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Total number of steps (own transformations plus field bridges).
    pub fn step_count(&self) -> usize {
        self.transforms.len() + self.bridges.len()
    }

    /// Number of field bridges.
    pub fn bridge_count(&self) -> usize {
        self.bridges.len()
    }

    /// Run every step against `value`, strictly in sequence.
    ///
    /// Stops at the first failing step and returns its error as-is.
    pub async fn run(&self, value: &mut T) -> anyhow::Result<()> {
        for (index, step) in self.transforms.iter().chain(self.bridges.iter()).enumerate() {
            trace!(
                target_type = type_name::<T>(),
                step = index,
                transform = step.name(),
                "Applying step"
            );
            step.apply(value).await?;
        }
        Ok(())
    }
}

impl<T> Clone for CompiledMutator<T> {
    fn clone(&self) -> Self {
        Self {
            transforms: Arc::clone(&self.transforms),
            bridges: Arc::clone(&self.bridges),
        }
    }
}

impl<T> fmt::Debug for CompiledMutator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledMutator")
            .field("target", &type_name::<T>())
            .field("transforms", &self.transforms.len())
            .field("bridges", &self.bridges.len())
            .finish()
    }
}

/// Runs a child mutator on the value at the end of a field chain.
pub(crate) struct FieldBridge<T, V> {
    chain: FieldChain<T, V>,
    inner: CompiledMutator<V>,
    label: String,
}

impl<T, V> FieldBridge<T, V> {
    pub(crate) fn new(chain: FieldChain<T, V>, inner: CompiledMutator<V>) -> Self {
        let label = format!("field:{}", chain.path());
        Self {
            chain,
            inner,
            label,
        }
    }
}

#[async_trait]
impl<T, V> Transform<T> for FieldBridge<T, V>
where
    T: Send + 'static,
    V: Send + 'static,
{
    fn name(&self) -> &str {
        &self.label
    }

    async fn apply(&self, root: &mut T) -> anyhow::Result<()> {
        let fields = self.chain.fields();
        let Some((outermost, nested)) = fields.split_first() else {
            return Ok(());
        };

        let mut owners: Vec<ErasedValue> = Vec::with_capacity(fields.len());
        for field in fields {
            let value = match owners.last() {
                Some(owner) => field.read(&**owner)?,
                None => field.read(&*root as &dyn Any)?,
            };
            owners.push(value);
        }

        let leaf_field = self.chain.leaf().map(|f| f.name()).unwrap_or_default();
        let leaf = owners
            .pop()
            .and_then(|leaf| leaf.downcast::<V>().ok())
            .ok_or(Error::ValueTypeMismatch {
                field: leaf_field,
                expected: type_name::<V>(),
            })?;
        let mut leaf = *leaf;

        let outcome = self.inner.run(&mut leaf).await;

        // owners now holds one value per nested hop's parent, outermost first.
        let mut value: ErasedValue = Box::new(leaf);
        for (field, mut owner) in nested.iter().rev().zip(owners.into_iter().rev()) {
            field.write(&mut *owner, value)?;
            value = owner;
        }
        outermost.write(&mut *root as &mut dyn Any, value)?;
        outcome
    }
}
