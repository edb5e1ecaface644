//! Error types for the pre-built transformations.

use thiserror::Error;

/// Errors raised by pre-built transformations.
///
/// `InvalidPattern`, `InvalidBounds` and `InvalidDigits` are returned while
/// configuring a pipeline. The rest occur while a pipeline runs and reach the
/// caller wrapped in [`anyhow::Error`].
#[derive(Error, Debug, Clone)]
pub enum TransformError {
    /// A replacement pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A clamp range whose lower bound is above its upper bound.
    #[error("Invalid bounds: lower bound is greater than upper bound")]
    InvalidBounds,

    /// More fractional digits than a float can round to.
    #[error("Cannot round to {0} digits (maximum is {max})", max = crate::numeric::MAX_ROUND_DIGITS)]
    InvalidDigits(u32),

    /// A character range outside the string.
    #[error("{op}: range {start}..{end} is outside a string of {len} characters")]
    OutOfRange {
        op: &'static str,
        start: usize,
        end: usize,
        len: usize,
    },

    /// Integer or duration arithmetic overflowed.
    #[error("{0}: arithmetic overflow")]
    Overflow(&'static str),

    /// A date/time moved outside the representable range.
    #[error("{0}: date/time out of range")]
    DateOutOfRange(&'static str),
}

pub type Result<T> = std::result::Result<T, TransformError>;

impl From<TransformError> for hygiene_core::Error {
    fn from(err: TransformError) -> Self {
        hygiene_core::Error::InvalidSettings(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = TransformError::OutOfRange {
            op: "remove",
            start: 4,
            end: 9,
            len: 6,
        };
        assert_eq!(
            err.to_string(),
            "remove: range 4..9 is outside a string of 6 characters"
        );
    }

    #[test]
    fn test_converts_into_pipeline_error() {
        let err: hygiene_core::Error = TransformError::InvalidBounds.into();
        assert_eq!(
            err,
            hygiene_core::Error::InvalidSettings(
                "Invalid bounds: lower bound is greater than upper bound".into()
            )
        );
    }

    #[test]
    fn test_invalid_digits_names_maximum() {
        assert_eq!(
            TransformError::InvalidDigits(20).to_string(),
            "Cannot round to 20 digits (maximum is 15)"
        );
    }
}
