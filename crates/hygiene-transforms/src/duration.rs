//! Duration arithmetic on [`TimeDelta`].

use crate::error::TransformError;
use crate::Step;
use chrono::TimeDelta;
use hygiene_core::PipelineBuilder;

pub trait TimeDeltaPipelineExt {
    fn add(&self, delta: TimeDelta) -> &Self;

    fn subtract(&self, delta: TimeDelta) -> &Self;

    fn negate(&self) -> &Self;

    fn abs(&self) -> &Self;
}

impl TimeDeltaPipelineExt for PipelineBuilder<TimeDelta> {
    fn add(&self, delta: TimeDelta) -> &Self {
        self.with_transform(Step::new("add", move |value: &mut TimeDelta| {
            *value = value
                .checked_add(&delta)
                .ok_or(TransformError::Overflow("add"))?;
            Ok(())
        }))
    }

    fn subtract(&self, delta: TimeDelta) -> &Self {
        self.with_transform(Step::new("subtract", move |value: &mut TimeDelta| {
            *value = value
                .checked_sub(&delta)
                .ok_or(TransformError::Overflow("subtract"))?;
            Ok(())
        }))
    }

    fn negate(&self) -> &Self {
        self.with_transform(Step::new("negate", |value: &mut TimeDelta| {
            *value = -*value;
            Ok(())
        }))
    }

    fn abs(&self) -> &Self {
        self.with_transform(Step::new("abs", |value: &mut TimeDelta| {
            *value = value.abs();
            Ok(())
        }))
    }
}
