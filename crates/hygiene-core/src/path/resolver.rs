//! Field-path resolution.
//!
//! Turns a [`PathExpression`] into a [`FieldChain`]: the fields to read, in
//! order, to get from the root value to the leaf. Everything that would make
//! the chain unusable for read-modify-write is rejected here, at
//! configuration time.

use super::expression::{PathExpression, PathNode};
use crate::error::{Error, PathError, Result};
use crate::field::{FieldDescriptor, FieldKey};
use std::any::{type_name, TypeId};
use std::fmt;
use std::marker::PhantomData;

/// Resolved fields from the root type `T` to a leaf of type `V`, outermost first.
pub struct FieldChain<T, V> {
    fields: Vec<FieldDescriptor>,
    _types: PhantomData<fn(&T) -> V>,
}

impl<T, V> FieldChain<T, V> {
    /// Descriptors ordered from the root's field to the leaf field.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Number of hops in the chain.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the chain has no hops.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The innermost field.
    pub fn leaf(&self) -> Option<&FieldDescriptor> {
        self.fields.last()
    }

    /// Dotted field names, e.g. `address.city`.
    pub fn path(&self) -> String {
        self.fields
            .iter()
            .map(FieldDescriptor::name)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Identity of every hop, used to detect duplicate registrations.
    pub fn keys(&self) -> Vec<FieldKey> {
        self.fields.iter().map(FieldDescriptor::key).collect()
    }
}

impl<T, V> Clone for FieldChain<T, V> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            _types: PhantomData,
        }
    }
}

impl<T, V> fmt::Debug for FieldChain<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldChain")
            .field("root", &type_name::<T>())
            .field("fields", &self.fields)
            .finish()
    }
}

/// Resolve a path expression into a writable field chain.
///
/// The expression must be a single-parameter lambda whose body is a chain
/// of member accesses ending at that parameter. Each field must continue
/// from the type produced by the previous hop and expose a public setter.
pub fn resolve<T, V>(expression: &PathExpression<T, V>) -> Result<FieldChain<T, V>>
where
    T: 'static,
    V: 'static,
{
    let root = match expression.parameters() {
        [root] => *root,
        parameters => return Err(PathError::ParameterCount(parameters.len()).into()),
    };

    let body = expression.body();
    if !matches!(body, PathNode::Member { .. }) {
        return Err(PathError::NotMemberAccess(body.kind()).into());
    }

    // The tree nests the innermost access at its top, so walk down from the
    // leaf and reverse once the root parameter is reached.
    let mut fields = Vec::new();
    let mut node = body;
    loop {
        match node {
            PathNode::Member { base, field } => {
                fields.push(field.clone());
                node = base.as_ref();
            }
            PathNode::Parameter(parameter) if *parameter == root => break,
            PathNode::Parameter(_) => return Err(PathError::ForeignParameter.into()),
            other => return Err(PathError::UnsupportedBase(other.kind()).into()),
        }
    }
    fields.reverse();

    let mut current = (TypeId::of::<T>(), type_name::<T>());
    for field in &fields {
        if field.owner_type() != current.0 {
            return Err(PathError::DiscontinuousChain {
                field: field.name(),
                owner: field.owner_name(),
                expected: current.1,
            }
            .into());
        }
        current = (field.value_type(), field.value_name());
    }
    if current.0 != TypeId::of::<V>() {
        return Err(PathError::LeafTypeMismatch {
            expected: type_name::<V>(),
            found: current.1,
        }
        .into());
    }

    if let Some(field) = fields.iter().find(|f| !f.write_access().is_public()) {
        return Err(Error::FieldNotWritable {
            owner: field.owner_name(),
            field: field.name(),
            access: field.write_access(),
        });
    }

    Ok(FieldChain {
        fields,
        _types: PhantomData,
    })
}
