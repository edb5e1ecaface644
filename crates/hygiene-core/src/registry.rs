//! Type-to-pipeline registry.
//!
//! Pipelines are configured per type on a [`SanitizerRegistryBuilder`] and
//! compiled once by [`SanitizerRegistryBuilder::build`]. The resulting
//! [`SanitizerRegistry`] is read-only; rebuild it to change a pipeline.
//!
//! ```rust
//! use hygiene_core::SanitizerRegistry;
//!
//! # fn main() -> hygiene_core::Result<()> {
//! let registry = SanitizerRegistry::configure(|registry| {
//!     registry.configure_with::<String, _>(|s| *s = s.trim().to_string())?;
//!     Ok(())
//! })?;
//!
//! let mut value = String::from("  padded  ");
//! registry.sanitizer::<String>()?.sanitize(&mut value).unwrap();
//! assert_eq!(value, "padded");
//!
//! assert!(registry.sanitizer::<u32>().is_err());
//! # Ok(())
//! # }
//! ```

use crate::builder::PipelineBuilder;
use crate::error::{Error, Result};
use crate::sanitizer::Sanitizer;
use serde::{Deserialize, Serialize};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// What to do when a type is configured a second time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with [`Error::DuplicateType`].
    #[default]
    Reject,
    /// The latest configuration wins.
    Replace,
}

trait PendingPipeline: Send + Sync {
    fn compile(&self) -> Box<dyn Any + Send + Sync>;
}

impl<T: Send + 'static> PendingPipeline for PipelineBuilder<T> {
    fn compile(&self) -> Box<dyn Any + Send + Sync> {
        Box::new(Sanitizer::from_mutator(self.build()))
    }
}

struct Entry<P> {
    name: &'static str,
    pipeline: P,
}

/// Collects per-type pipeline configurations.
#[derive(Default)]
pub struct SanitizerRegistryBuilder {
    policy: DuplicatePolicy,
    pending: HashMap<TypeId, Entry<Box<dyn PendingPipeline>>>,
}

impl SanitizerRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how repeated configuration of one type is handled.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Configure the pipeline for `T`.
    ///
    /// `configure` receives a fresh builder. If it fails, or `T` is already
    /// configured under [`DuplicatePolicy::Reject`], nothing is registered.
    pub fn configure<T, F>(&mut self, configure: F) -> Result<&mut Self>
    where
        T: Send + 'static,
        F: FnOnce(&PipelineBuilder<T>) -> Result<()>,
    {
        let id = TypeId::of::<T>();
        let name = type_name::<T>();
        if self.policy == DuplicatePolicy::Reject && self.pending.contains_key(&id) {
            return Err(Error::DuplicateType(name));
        }

        let builder = PipelineBuilder::<T>::new();
        configure(&builder)?;

        let replaced = self
            .pending
            .insert(
                id,
                Entry {
                    name,
                    pipeline: Box::new(builder),
                },
            )
            .is_some();
        debug!(target_type = name, replaced, "Registered type pipeline");
        Ok(self)
    }

    /// Configure `T` with a single infallible transformation.
    pub fn configure_with<T, F>(&mut self, visitor: F) -> Result<&mut Self>
    where
        T: Send + 'static,
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.configure::<T, _>(|builder| {
            builder.transform(visitor);
            Ok(())
        })
    }

    /// Compile every configured pipeline.
    pub fn build(self) -> SanitizerRegistry {
        let sanitizers: HashMap<_, _> = self
            .pending
            .into_iter()
            .map(|(id, entry)| {
                (
                    id,
                    Entry {
                        name: entry.name,
                        pipeline: entry.pipeline.compile(),
                    },
                )
            })
            .collect();

        debug!(types = sanitizers.len(), "Built sanitizer registry");
        SanitizerRegistry { sanitizers }
    }
}

impl fmt::Debug for SanitizerRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanitizerRegistryBuilder")
            .field("policy", &self.policy)
            .field("types", &self.pending.len())
            .finish()
    }
}

/// Compiled sanitizers keyed by the type they handle.
pub struct SanitizerRegistry {
    sanitizers: HashMap<TypeId, Entry<Box<dyn Any + Send + Sync>>>,
}

impl SanitizerRegistry {
    pub fn builder() -> SanitizerRegistryBuilder {
        SanitizerRegistryBuilder::new()
    }

    /// Configure and build a registry in one call.
    pub fn configure<F>(configure: F) -> Result<Self>
    where
        F: FnOnce(&mut SanitizerRegistryBuilder) -> Result<()>,
    {
        let mut builder = SanitizerRegistryBuilder::new();
        configure(&mut builder)?;
        Ok(builder.build())
    }

    /// The sanitizer configured for `T`.
    pub fn sanitizer<T: Send + 'static>(&self) -> Result<Sanitizer<T>> {
        self.sanitizers
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.pipeline.downcast_ref::<Sanitizer<T>>())
            .cloned()
            .ok_or(Error::TypeNotRegistered(type_name::<T>()))
    }

    /// Whether a pipeline was configured for `T`.
    pub fn contains<T: 'static>(&self) -> bool {
        self.sanitizers.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.sanitizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sanitizers.is_empty()
    }

    /// Names of the registered types, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.sanitizers.values().map(|entry| entry.name).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for SanitizerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanitizerRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_type_is_reported() {
        let registry = SanitizerRegistry::builder().build();
        let err = registry.sanitizer::<String>().unwrap_err();

        assert_eq!(err, Error::TypeNotRegistered("alloc::string::String"));
        assert_eq!(
            err.to_string(),
            "The type alloc::string::String wasn't registered"
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_type_is_rejected_by_default() {
        let mut builder = SanitizerRegistry::builder();
        builder.configure_with::<u8, _>(|n| *n += 1).unwrap();

        let err = builder.configure_with::<u8, _>(|n| *n += 2).unwrap_err();
        assert!(matches!(err, Error::DuplicateType(_)));

        let registry = builder.build();
        let mut value = 0;
        registry.sanitizer::<u8>().unwrap().sanitize(&mut value).unwrap();
        assert_eq!(value, 1);
    }

    #[test]
    fn test_replace_policy_keeps_latest() {
        let mut builder =
            SanitizerRegistry::builder().with_duplicate_policy(DuplicatePolicy::Replace);
        builder
            .configure_with::<u8, _>(|n| *n += 1)
            .unwrap()
            .configure_with::<u8, _>(|n| *n += 2)
            .unwrap();

        let registry = builder.build();
        assert_eq!(registry.len(), 1);

        let mut value = 0;
        registry.sanitizer::<u8>().unwrap().sanitize(&mut value).unwrap();
        assert_eq!(value, 2);
    }

    #[test]
    fn test_failed_configuration_registers_nothing() {
        let mut builder = SanitizerRegistry::builder();
        let err = builder
            .configure::<String, _>(|_| Err(Error::DuplicateField("name".into())))
            .unwrap_err();

        assert_eq!(err, Error::DuplicateField("name".into()));
        assert!(!builder.build().contains::<String>());
    }

    #[test]
    fn test_type_names_are_sorted() {
        let registry = SanitizerRegistry::configure(|registry| {
            registry
                .configure_with::<u32, _>(|_| {})?
                .configure_with::<String, _>(|_| {})?;
            Ok(())
        })
        .unwrap();

        assert_eq!(registry.type_names(), vec!["alloc::string::String", "u32"]);
        assert!(registry.contains::<u32>());
    }

    #[test]
    fn test_policy_deserializes_lowercase() {
        let policy: DuplicatePolicy = serde_json::from_str("\"replace\"").unwrap();
        assert_eq!(policy, DuplicatePolicy::Replace);
        assert_eq!(DuplicatePolicy::default(), DuplicatePolicy::Reject);
    }
}
