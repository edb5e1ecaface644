//! Ready-made transformations for common value types.
//!
//! Each module adds an extension trait to
//! [`PipelineBuilder`](hygiene_core::PipelineBuilder) for one family of types.
//! The methods append a [`Transform`] to the builder and return it for
//! chaining, like `PipelineBuilder::transform` does.
//!
//! ```rust
//! use hygiene_core::Sanitizer;
//! use hygiene_transforms::StringPipelineExt;
//!
//! # fn main() -> anyhow::Result<()> {
//! let sanitizer = Sanitizer::<String>::create(|builder| {
//!     builder.trim_chars(&['-']).to_upper();
//!     Ok(())
//! })?;
//!
//! let mut value = String::from("--success--");
//! sanitizer.sanitize(&mut value)?;
//! assert_eq!(value, "SUCCESS");
//! # Ok(())
//! # }
//! ```

pub mod datetime;
pub mod duration;
pub mod error;
pub mod numeric;
pub mod string;

pub use datetime::{DateTimePipelineExt, OffsetPipelineExt};
pub use duration::TimeDeltaPipelineExt;
pub use error::{Result, TransformError};
pub use numeric::{AbsPipelineExt, BoundsPipelineExt, FloatPipelineExt, Rounding};
pub use string::StringPipelineExt;

use async_trait::async_trait;
use hygiene_core::Transform;

/// A named in-place step whose failures are [`TransformError`]s.
pub(crate) struct Step<F> {
    name: &'static str,
    f: F,
}

impl<F> Step<F> {
    pub(crate) fn new<T>(name: &'static str, f: F) -> Self
    where
        F: Fn(&mut T) -> Result<()>,
    {
        Self { name, f }
    }
}

#[async_trait]
impl<T, F> Transform<T> for Step<F>
where
    T: Send,
    F: Fn(&mut T) -> Result<()> + Send + Sync,
{
    fn name(&self) -> &str {
        self.name
    }

    async fn apply(&self, value: &mut T) -> anyhow::Result<()> {
        (self.f)(value)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use hygiene_core::{PipelineBuilder, Sanitizer};

    /// Run the builder's pipeline once through the blocking entry point.
    pub fn run<T: Send + 'static>(builder: &PipelineBuilder<T>, mut value: T) -> anyhow::Result<T> {
        Sanitizer::from_mutator(builder.build()).sanitize(&mut value)?;
        Ok(value)
    }
}
