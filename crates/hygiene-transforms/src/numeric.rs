//! Numeric transformations.

use crate::error::{Result, TransformError};
use crate::Step;
use hygiene_core::PipelineBuilder;
use std::cmp::Ordering;

/// Largest number of fractional digits accepted by `round`.
pub const MAX_ROUND_DIGITS: u32 = 15;

/// How `round` resolves a value exactly halfway between two candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rounding {
    /// Banker's rounding: 2.5 becomes 2, 3.5 becomes 4.
    #[default]
    ToEven,
    /// 2.5 becomes 3, -2.5 becomes -3.
    AwayFromZero,
}

/// Bounds for any partially ordered value.
pub trait BoundsPipelineExt<V> {
    /// Raise values below `bound` up to it.
    fn max(&self, bound: V) -> &Self;

    /// Lower values above `bound` down to it.
    fn min(&self, bound: V) -> &Self;

    /// Keep values within `lower..=upper`.
    fn clamp(&self, lower: V, upper: V) -> Result<&Self>;
}

impl<V> BoundsPipelineExt<V> for PipelineBuilder<V>
where
    V: PartialOrd + Copy + Send + Sync + 'static,
{
    fn max(&self, bound: V) -> &Self {
        self.with_transform(Step::new("max", move |value: &mut V| {
            if *value < bound {
                *value = bound;
            }
            Ok(())
        }))
    }

    fn min(&self, bound: V) -> &Self {
        self.with_transform(Step::new("min", move |value: &mut V| {
            if *value > bound {
                *value = bound;
            }
            Ok(())
        }))
    }

    fn clamp(&self, lower: V, upper: V) -> Result<&Self> {
        match lower.partial_cmp(&upper) {
            Some(Ordering::Less | Ordering::Equal) => {}
            _ => return Err(TransformError::InvalidBounds),
        }

        Ok(self.with_transform(Step::new("clamp", move |value: &mut V| {
            if *value < lower {
                *value = lower;
            } else if *value > upper {
                *value = upper;
            }
            Ok(())
        })))
    }
}

/// Absolute value. Fails at execution for the integer minimum.
pub trait AbsPipelineExt {
    fn abs(&self) -> &Self;
}

macro_rules! impl_checked_abs {
    ($($int:ty),*) => {
        $(
            impl AbsPipelineExt for PipelineBuilder<$int> {
                fn abs(&self) -> &Self {
                    self.with_transform(Step::new("abs", |value: &mut $int| {
                        *value = value
                            .checked_abs()
                            .ok_or(TransformError::Overflow("abs"))?;
                        Ok(())
                    }))
                }
            }
        )*
    };
}

impl_checked_abs!(i8, i16, i32, i64, i128, isize);

/// Floating-point helpers.
pub trait FloatPipelineExt {
    fn floor(&self) -> &Self;

    fn ceil(&self) -> &Self;

    /// Round to `digits` fractional digits.
    ///
    /// Values too large to carry fractional digits are left as they are.
    fn round(&self, digits: u32, mode: Rounding) -> Result<&Self>;

    /// Drop the fractional part.
    fn truncate(&self) -> &Self;

    fn sqrt(&self) -> &Self;

    /// Raise to an integer power.
    fn powi(&self, exponent: i32) -> &Self;
}

macro_rules! impl_float {
    ($($float:ty),*) => {
        $(
            impl AbsPipelineExt for PipelineBuilder<$float> {
                fn abs(&self) -> &Self {
                    self.with_transform(Step::new("abs", |value: &mut $float| {
                        *value = value.abs();
                        Ok(())
                    }))
                }
            }

            impl FloatPipelineExt for PipelineBuilder<$float> {
                fn floor(&self) -> &Self {
                    self.with_transform(Step::new("floor", |value: &mut $float| {
                        *value = value.floor();
                        Ok(())
                    }))
                }

                fn ceil(&self) -> &Self {
                    self.with_transform(Step::new("ceil", |value: &mut $float| {
                        *value = value.ceil();
                        Ok(())
                    }))
                }

                fn round(&self, digits: u32, mode: Rounding) -> Result<&Self> {
                    if digits > MAX_ROUND_DIGITS {
                        return Err(TransformError::InvalidDigits(digits));
                    }
                    let scale = <$float>::powi(10.0, digits as i32);

                    Ok(self.with_transform(Step::new("round", move |value: &mut $float| {
                        let scaled = *value * scale;
                        if scaled.is_finite() {
                            let rounded = match mode {
                                Rounding::ToEven => scaled.round_ties_even(),
                                Rounding::AwayFromZero => scaled.round(),
                            };
                            *value = rounded / scale;
                        }
                        Ok(())
                    })))
                }

                fn truncate(&self) -> &Self {
                    self.with_transform(Step::new("truncate", |value: &mut $float| {
                        *value = value.trunc();
                        Ok(())
                    }))
                }

                fn sqrt(&self) -> &Self {
                    self.with_transform(Step::new("sqrt", |value: &mut $float| {
                        *value = value.sqrt();
                        Ok(())
                    }))
                }

                fn powi(&self, exponent: i32) -> &Self {
                    self.with_transform(Step::new("powi", move |value: &mut $float| {
                        *value = value.powi(exponent);
                        Ok(())
                    }))
                }
            }
        )*
    };
}

impl_float!(f32, f64);
