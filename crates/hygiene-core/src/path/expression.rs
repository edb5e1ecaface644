//! Path expressions.
//!
//! A [`PathExpression`] is a small expression tree describing a lambda of one
//! parameter, such as `|x| x.address.city`. The typed constructors make the
//! common case read naturally:
//!
//! ```rust
//! use hygiene_core::{field, PathExpression};
//!
//! #[derive(Clone)]
//! struct Address { city: String }
//! #[derive(Clone)]
//! struct Customer { address: Address }
//!
//! let path = PathExpression::<Customer, Customer>::root()
//!     .field(field!(Customer, address))
//!     .field(field!(Address, city));
//! assert_eq!(path.to_string(), "|x| x.address.city");
//! ```
//!
//! The tree can also express shapes the resolver refuses (method calls,
//! constants, the bare parameter), because callers can build them and the
//! resolver must say why they are not usable as a storage location.

use crate::field::{Field, FieldDescriptor};
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PARAMETER_ID: AtomicU64 = AtomicU64::new(0);

/// A lambda parameter. Each call to [`Parameter::new`] yields a distinct one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Parameter {
    id: u64,
    name: &'static str,
}

impl Parameter {
    /// Create a fresh parameter with a display name.
    pub fn new(name: &'static str) -> Self {
        Self {
            id: NEXT_PARAMETER_ID.fetch_add(1, Ordering::Relaxed),
            name,
        }
    }

    /// Display name of the parameter.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A node of a path expression tree.
#[derive(Debug, Clone)]
pub enum PathNode {
    /// Reference to a lambda parameter.
    Parameter(Parameter),
    /// Field access on `base`.
    Member {
        /// Expression the field is read from
        base: Box<PathNode>,
        /// The accessed field
        field: FieldDescriptor,
    },
    /// Method call on `base`.
    Call {
        /// Receiver of the call
        base: Box<PathNode>,
        /// Method name
        method: &'static str,
    },
    /// A captured constant.
    Constant {
        /// Debug rendering of the value
        repr: String,
    },
}

impl PathNode {
    /// Short description of the node kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parameter(_) => "parameter reference",
            Self::Member { .. } => "member access",
            Self::Call { .. } => "method call",
            Self::Constant { .. } => "constant",
        }
    }
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter(parameter) => write!(f, "{}", parameter.name),
            Self::Member { base, field } => write!(f, "{}.{}", base, field.name()),
            Self::Call { base, method } => write!(f, "{}.{}()", base, method),
            Self::Constant { repr } => write!(f, "{}", repr),
        }
    }
}

/// A lambda from `T` to `V` expressed as a [`PathNode`] tree.
pub struct PathExpression<T, V> {
    parameters: Vec<Parameter>,
    body: PathNode,
    _types: PhantomData<fn(&T) -> V>,
}

impl<T: 'static> PathExpression<T, T> {
    /// The identity lambda `|x| x`; the starting point for field chains.
    pub fn root() -> Self {
        let parameter = Parameter::new("x");
        Self {
            parameters: vec![parameter],
            body: PathNode::Parameter(parameter),
            _types: PhantomData,
        }
    }
}

impl<T: 'static, V: 'static> PathExpression<T, V> {
    /// A lambda ignoring its parameter and returning a captured value.
    pub fn constant(value: V) -> Self
    where
        V: fmt::Debug,
    {
        Self {
            parameters: vec![Parameter::new("_")],
            body: PathNode::Constant {
                repr: format!("{:?}", value),
            },
            _types: PhantomData,
        }
    }

    /// Assemble an expression from raw parts.
    ///
    /// Nothing is checked here; [`resolve`](crate::resolve) validates the
    /// parameter list, the node shapes and the types along the chain.
    pub fn from_lambda(parameters: Vec<Parameter>, body: PathNode) -> Self {
        Self {
            parameters,
            body,
            _types: PhantomData,
        }
    }

    /// Access a field of the current value.
    pub fn field<W: Send + 'static>(self, field: Field<V, W>) -> PathExpression<T, W> {
        PathExpression {
            parameters: self.parameters,
            body: PathNode::Member {
                base: Box::new(self.body),
                field: field.into(),
            },
            _types: PhantomData,
        }
    }

    /// Call a method on the current value.
    pub fn call<W: 'static>(self, method: &'static str) -> PathExpression<T, W> {
        PathExpression {
            parameters: self.parameters,
            body: PathNode::Call {
                base: Box::new(self.body),
                method,
            },
            _types: PhantomData,
        }
    }

    /// Parameters of the lambda.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Body of the lambda.
    pub fn body(&self) -> &PathNode {
        &self.body
    }
}

impl<T, V> Clone for PathExpression<T, V> {
    fn clone(&self) -> Self {
        Self {
            parameters: self.parameters.clone(),
            body: self.body.clone(),
            _types: PhantomData,
        }
    }
}

impl<T, V> fmt::Display for PathExpression<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.parameters.iter().map(|p| p.name).collect();
        write!(f, "|{}| {}", names.join(", "), self.body)
    }
}

impl<T, V> fmt::Debug for PathExpression<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathExpression")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish()
    }
}
