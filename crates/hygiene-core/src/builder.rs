//! Pipeline builders.
//!
//! A [`PipelineBuilder`] collects whole-value transformations for `T` and one
//! child builder per registered field. [`PipelineBuilder::build`] compiles the
//! tree into a [`CompiledMutator`].
//!
//! ```rust
//! use hygiene_core::{field, PathExpression, PipelineBuilder};
//!
//! #[derive(Clone)]
//! struct Contact {
//!     phone: String,
//! }
//!
//! # fn main() -> hygiene_core::Result<()> {
//! let builder = PipelineBuilder::<Contact>::new();
//! builder
//!     .property(PathExpression::root().field(field!(Contact, phone)))?
//!     .transform(|phone| phone.retain(|c| c != '-'))
//!     .transform(|phone| phone.insert_str(0, "1-"));
//!
//! let mutator = builder.build();
//! assert_eq!(mutator.bridge_count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! Builders are handles: cloning one yields another handle to the same node,
//! so a child returned by `property` can be configured after the parent has
//! moved on. Configuration is expected to finish before `build` is called.

use crate::error::{Error, Result};
use crate::field::FieldKey;
use crate::mutator::{CompiledMutator, FieldBridge};
use crate::path::{resolve, FieldChain, PathExpression};
use crate::transform::{AsyncFnTransform, FnTransform, Transform, TryFnTransform};
use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A registered field together with the builder for its value type.
trait FieldPipeline<T>: Send {
    fn keys(&self) -> &[FieldKey];
    fn path(&self) -> String;
    fn compile(&self) -> Arc<dyn Transform<T>>;
}

struct FieldNode<T, V> {
    keys: Vec<FieldKey>,
    chain: FieldChain<T, V>,
    builder: PipelineBuilder<V>,
}

impl<T, V> FieldPipeline<T> for FieldNode<T, V>
where
    T: Send + 'static,
    V: Send + 'static,
{
    fn keys(&self) -> &[FieldKey] {
        &self.keys
    }

    fn path(&self) -> String {
        self.chain.path()
    }

    fn compile(&self) -> Arc<dyn Transform<T>> {
        Arc::new(FieldBridge::new(self.chain.clone(), self.builder.build()))
    }
}

struct BuilderState<T> {
    transforms: Vec<Arc<dyn Transform<T>>>,
    fields: Vec<Box<dyn FieldPipeline<T>>>,
}

/// Fluent configuration of a pipeline for values of type `T`.
pub struct PipelineBuilder<T> {
    state: Arc<Mutex<BuilderState<T>>>,
}

impl<T: Send + 'static> PipelineBuilder<T> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(BuilderState {
                transforms: Vec::new(),
                fields: Vec::new(),
            })),
        }
    }

    /// Append an infallible in-place transformation.
    pub fn transform<F>(&self, f: F) -> &Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.with_transform(FnTransform::new(f))
    }

    /// Append a fallible in-place transformation.
    pub fn try_transform<F>(&self, f: F) -> &Self
    where
        F: Fn(&mut T) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.with_transform(TryFnTransform::new(f))
    }

    /// Append a transformation that may suspend before completing.
    pub fn transform_async<F>(&self, f: F) -> &Self
    where
        F: for<'a> Fn(&'a mut T) -> BoxFuture<'a, anyhow::Result<()>> + Send + Sync + 'static,
    {
        self.with_transform(AsyncFnTransform::new(f))
    }

    /// Append any [`Transform`] implementation.
    pub fn with_transform<X>(&self, transform: X) -> &Self
    where
        X: Transform<T> + 'static,
    {
        self.state.lock().transforms.push(Arc::new(transform));
        self
    }

    /// Register a field path and return the builder for its value.
    ///
    /// The path is resolved immediately. An invalid path, an unwritable
    /// field, or a path already registered on this node is an error, and
    /// nothing is registered in that case.
    pub fn property<V>(&self, path: PathExpression<T, V>) -> Result<PipelineBuilder<V>>
    where
        V: Send + 'static,
    {
        let chain = resolve(&path)?;
        let keys = chain.keys();

        let mut state = self.state.lock();
        if state.fields.iter().any(|field| field.keys() == keys.as_slice()) {
            return Err(Error::DuplicateField(chain.path()));
        }

        debug!(
            target_type = type_name::<T>(),
            field = %chain.path(),
            depth = chain.len(),
            "Registered field pipeline"
        );

        let child = PipelineBuilder::new();
        state.fields.push(Box::new(FieldNode {
            keys,
            chain,
            builder: child.clone(),
        }));
        Ok(child)
    }

    /// Number of whole-value transformations on this node.
    pub fn transform_count(&self) -> usize {
        self.state.lock().transforms.len()
    }

    /// Dotted paths of the registered fields, in registration order.
    pub fn field_paths(&self) -> Vec<String> {
        self.state
            .lock()
            .fields
            .iter()
            .map(|field| field.path())
            .collect()
    }

    /// Compile this node and every child into one mutator.
    pub fn build(&self) -> CompiledMutator<T> {
        let state = self.state.lock();
        let bridges: Vec<_> = state.fields.iter().map(|field| field.compile()).collect();

        debug!(
            target_type = type_name::<T>(),
            transforms = state.transforms.len(),
            fields = bridges.len(),
            "Compiled pipeline"
        );

        CompiledMutator::new(state.transforms.clone(), bridges)
    }
}

impl<T: Send + 'static> Default for PipelineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for PipelineBuilder<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> fmt::Debug for PipelineBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("PipelineBuilder")
            .field("target", &type_name::<T>())
            .field("transforms", &state.transforms.len())
            .field(
                "fields",
                &state.fields.iter().map(|field| field.path()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PathError, WriteAccess};
    use crate::field;
    use crate::field::Field;

    #[derive(Debug, Clone, PartialEq)]
    struct Tag {
        label: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Post {
        title: String,
        tag: Tag,
    }

    fn post() -> Post {
        Post {
            title: " hello ".into(),
            tag: Tag {
                label: "news".into(),
            },
        }
    }

    fn root() -> PathExpression<Post, Post> {
        PathExpression::root()
    }

    #[tokio::test]
    async fn test_transforms_chain_on_the_same_node() {
        let builder = PipelineBuilder::<String>::new();
        builder
            .transform(|s| s.insert_str(0, "<"))
            .transform(|s| s.push('>'));

        assert_eq!(builder.transform_count(), 2);

        let mut value = String::from("x");
        builder.build().run(&mut value).await.unwrap();
        assert_eq!(value, "<x>");
    }

    #[tokio::test]
    async fn test_child_configured_after_registration_is_compiled() {
        let builder = PipelineBuilder::<Post>::new();
        let title = builder.property(root().field(field!(Post, title))).unwrap();
        title.transform(|s| *s = s.trim().to_string());

        let mut value = post();
        builder.build().run(&mut value).await.unwrap();
        assert_eq!(value.title, "hello");
    }

    #[test]
    fn test_duplicate_field_is_rejected() {
        let builder = PipelineBuilder::<Post>::new();
        builder.property(root().field(field!(Post, title))).unwrap();

        let err = builder
            .property(root().field(field!(Post, title)))
            .unwrap_err();
        assert_eq!(err, Error::DuplicateField("title".into()));
        assert_eq!(builder.field_paths(), vec!["title"]);
    }

    #[test]
    fn test_nested_and_shallow_paths_are_distinct() {
        let builder = PipelineBuilder::<Post>::new();
        builder.property(root().field(field!(Post, tag))).unwrap();
        builder
            .property(root().field(field!(Post, tag)).field(field!(Tag, label)))
            .unwrap();

        assert_eq!(builder.field_paths(), vec!["tag", "tag.label"]);
    }

    #[test]
    fn test_failed_property_registers_nothing() {
        let builder = PipelineBuilder::<Post>::new();

        let call = root().call::<Post>("normalized").field(field!(Post, title));
        assert_eq!(
            builder.property(call).unwrap_err(),
            Error::InvalidPath(PathError::UnsupportedBase("method call"))
        );

        let read_only = Field::read_only("title", |p: &Post| p.title.clone());
        assert!(matches!(
            builder.property(root().field(read_only)).unwrap_err(),
            Error::FieldNotWritable {
                access: WriteAccess::Absent,
                ..
            }
        ));

        assert!(builder.field_paths().is_empty());
        assert_eq!(builder.build().step_count(), 0);
    }

    #[test]
    fn test_clone_shares_the_node() {
        let builder = PipelineBuilder::<String>::new();
        let handle = builder.clone();
        handle.transform(|s| s.clear());

        assert_eq!(builder.transform_count(), 1);
    }
}
