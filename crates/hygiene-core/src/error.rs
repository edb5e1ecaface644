//! Error types for pipeline configuration.
//!
//! Configuration-time problems (bad path expressions, unwritable fields,
//! registry misses) are reported through [`Error`]. Failures raised by a
//! transformation while a pipeline runs are carried as [`anyhow::Error`] and
//! reach the caller exactly as the transformation produced them.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while configuring or resolving a pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The argument to `property` is not a simple field-access chain.
    #[error("Invalid path expression: {0}")]
    InvalidPath(#[from] PathError),

    /// A field in the resolved chain has no public setter.
    #[error("Field '{field}' on {owner} is not writable: {access}")]
    FieldNotWritable {
        /// Type that declares the field
        owner: &'static str,
        /// Name of the field
        field: &'static str,
        /// Why the field cannot be written
        access: WriteAccess,
    },

    /// The same field path was registered twice on one builder node.
    #[error("Field path '{0}' is already registered on this builder")]
    DuplicateField(String),

    /// No pipeline was configured for the requested type.
    #[error("The type {0} wasn't registered")]
    TypeNotRegistered(&'static str),

    /// A pipeline for the type already exists in the registry.
    #[error("The type {0} is already registered")]
    DuplicateType(&'static str),

    /// A transformation rejected the settings it was configured with.
    #[error("Invalid transformation settings: {0}")]
    InvalidSettings(String),

    /// An erased accessor received a value of the wrong type.
    #[error("Field '{field}' received a value that is not a {expected}")]
    ValueTypeMismatch {
        /// Name of the field
        field: &'static str,
        /// Type the accessor expected
        expected: &'static str,
    },
}

/// Reasons a path expression is rejected by the resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The expression is not a single-parameter lambda.
    #[error("the expression must take exactly one parameter, found {0}")]
    ParameterCount(usize),

    /// The expression body is not a member access.
    #[error("the expression body must be a member access, found {0}")]
    NotMemberAccess(&'static str),

    /// A member access is based on something other than the root or another member.
    #[error("only simple field-access chains are supported, found {0}")]
    UnsupportedBase(&'static str),

    /// The chain ends at a parameter that does not belong to this expression.
    #[error("the chain is not rooted at the expression's parameter")]
    ForeignParameter,

    /// A field is declared on a different type than the value it is read from.
    #[error("field '{field}' is declared on {owner}, but the chain yields {expected} at that point")]
    DiscontinuousChain {
        /// Name of the offending field
        field: &'static str,
        /// Type that declares the field
        owner: &'static str,
        /// Type produced by the previous step
        expected: &'static str,
    },

    /// The leaf field does not produce the expression's declared value type.
    #[error("the chain yields {found}, but the expression declares {expected}")]
    LeafTypeMismatch {
        /// Declared value type
        expected: &'static str,
        /// Type the leaf field produces
        found: &'static str,
    },
}

/// How a field may be written by a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteAccess {
    /// The setter is exposed to pipelines.
    Public,
    /// A setter exists but is not visible to the caller.
    Private,
    /// The field has no setter.
    Absent,
}

impl WriteAccess {
    /// Whether pipelines may write through this access level.
    pub fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

impl fmt::Display for WriteAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "setter is public"),
            Self::Private => write!(f, "setter is not publicly accessible"),
            Self::Absent => write!(f, "field has no setter"),
        }
    }
}

/// Result type for pipeline configuration.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_error_converts_into_invalid_path() {
        let err: Error = PathError::ParameterCount(2).into();
        assert!(matches!(err, Error::InvalidPath(PathError::ParameterCount(2))));
        assert_eq!(
            err.to_string(),
            "Invalid path expression: the expression must take exactly one parameter, found 2"
        );
    }

    #[test]
    fn test_field_not_writable_message_names_reason() {
        let err = Error::FieldNotWritable {
            owner: "Account",
            field: "id",
            access: WriteAccess::Private,
        };
        assert_eq!(
            err.to_string(),
            "Field 'id' on Account is not writable: setter is not publicly accessible"
        );
    }

    #[test]
    fn test_write_access_is_public() {
        assert!(WriteAccess::Public.is_public());
        assert!(!WriteAccess::Private.is_public());
        assert!(!WriteAccess::Absent.is_public());
    }
}
