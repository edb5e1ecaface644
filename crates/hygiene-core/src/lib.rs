//! Declarative value-sanitization pipelines.
//!
//! ## Purpose
//!
//! Configure in-place transformations for a type once, compile them, then run
//! them repeatedly: `PipelineBuilder<T>` → `CompiledMutator<T>` → `Sanitizer<T>`.
//!
//! ## Architecture
//!
//! - `field`: read/write accessors for one struct member
//! - `path`: field-path expressions and their resolution into writable chains
//! - `builder`: per-type builders with child builders per field
//! - `mutator`: the compiled pipeline and the field read-invoke-write bridge
//! - `sanitizer` / `registry`: execution entry points and per-type lookup
//!
//! ## Usage
//!
//! ```rust
//! use hygiene_core::{field, PathExpression, Sanitizer};
//!
//! #[derive(Clone)]
//! struct Contact {
//!     phone: String,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let sanitizer = Sanitizer::<Contact>::create(|builder| {
//!     builder
//!         .property(PathExpression::root().field(field!(Contact, phone)))?
//!         .transform(|phone| phone.retain(|c| c != '-'))
//!         .transform(|phone| *phone = phone.trim().to_string())
//!         .transform(|phone| phone.insert_str(0, "1-"));
//!     Ok(())
//! })?;
//!
//! let mut contact = Contact { phone: " 555-555-5555 ".into() };
//! sanitizer.sanitize(&mut contact)?;
//! assert_eq!(contact.phone, "1-5555555555");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod field;
pub mod mutator;
pub mod path;
pub mod registry;
pub mod sanitizer;
pub mod transform;

pub use builder::PipelineBuilder;
pub use error::{Error, PathError, Result, WriteAccess};
pub use field::{Field, FieldDescriptor, FieldKey};
pub use mutator::CompiledMutator;
pub use path::{resolve, FieldChain, Parameter, PathExpression, PathNode};
pub use registry::{DuplicatePolicy, SanitizerRegistry, SanitizerRegistryBuilder};
pub use sanitizer::Sanitizer;
pub use transform::{AsyncFnTransform, FnTransform, Transform, TryFnTransform};
