//! Date/time arithmetic on `chrono` values.
//!
//! Fractional amounts (`add_days(1.5)`) are rounded to the nearest
//! millisecond. Results outside chrono's representable range fail when the
//! pipeline runs.

use crate::error::{Result, TransformError};
use crate::Step;
use chrono::{DateTime, FixedOffset, Local, Months, Offset, TimeDelta, TimeZone, Utc};
use hygiene_core::PipelineBuilder;

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60.0 * MS_PER_SECOND;
const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;

fn fractional_delta(op: &'static str, amount: f64, unit_ms: f64) -> Result<TimeDelta> {
    let millis = (amount * unit_ms).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return Err(TransformError::DateOutOfRange(op));
    }
    TimeDelta::try_milliseconds(millis as i64).ok_or(TransformError::DateOutOfRange(op))
}

fn shift<Tz: TimeZone>(op: &'static str, value: &mut DateTime<Tz>, delta: TimeDelta) -> Result<()> {
    *value = value
        .clone()
        .checked_add_signed(delta)
        .ok_or(TransformError::DateOutOfRange(op))?;
    Ok(())
}

fn shift_months<Tz: TimeZone>(op: &'static str, value: &mut DateTime<Tz>, months: i32) -> Result<()> {
    let shifted = if months >= 0 {
        value.clone().checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        value.clone().checked_sub_months(Months::new(months.unsigned_abs()))
    };
    *value = shifted.ok_or(TransformError::DateOutOfRange(op))?;
    Ok(())
}

/// Calendar and clock arithmetic for [`DateTime`] fields in any time zone.
pub trait DateTimePipelineExt {
    fn add(&self, delta: TimeDelta) -> &Self;

    fn subtract(&self, delta: TimeDelta) -> &Self;

    /// Shift by whole years, clamping the day to the end of the month.
    fn add_years(&self, years: i32) -> &Self;

    /// Shift by whole months, clamping the day to the end of the month.
    fn add_months(&self, months: i32) -> &Self;

    fn add_days(&self, days: f64) -> &Self;

    fn add_hours(&self, hours: f64) -> &Self;

    fn add_minutes(&self, minutes: f64) -> &Self;

    fn add_seconds(&self, seconds: f64) -> &Self;

    fn add_milliseconds(&self, milliseconds: f64) -> &Self;
}

macro_rules! fractional_shift {
    ($name:ident, $unit:expr) => {
        fn $name(&self, amount: f64) -> &Self {
            self.with_transform(Step::new(stringify!($name), move |value: &mut DateTime<Tz>| {
                let delta = fractional_delta(stringify!($name), amount, $unit)?;
                shift(stringify!($name), value, delta)
            }))
        }
    };
}

impl<Tz> DateTimePipelineExt for PipelineBuilder<DateTime<Tz>>
where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync + 'static,
{
    fn add(&self, delta: TimeDelta) -> &Self {
        self.with_transform(Step::new("add", move |value: &mut DateTime<Tz>| {
            shift("add", value, delta)
        }))
    }

    fn subtract(&self, delta: TimeDelta) -> &Self {
        self.with_transform(Step::new("subtract", move |value: &mut DateTime<Tz>| {
            let negated = TimeDelta::zero()
                .checked_sub(&delta)
                .ok_or(TransformError::DateOutOfRange("subtract"))?;
            shift("subtract", value, negated)
        }))
    }

    fn add_years(&self, years: i32) -> &Self {
        self.with_transform(Step::new("add_years", move |value: &mut DateTime<Tz>| {
            let months = years
                .checked_mul(12)
                .ok_or(TransformError::DateOutOfRange("add_years"))?;
            shift_months("add_years", value, months)
        }))
    }

    fn add_months(&self, months: i32) -> &Self {
        self.with_transform(Step::new("add_months", move |value: &mut DateTime<Tz>| {
            shift_months("add_months", value, months)
        }))
    }

    fractional_shift!(add_days, MS_PER_DAY);
    fractional_shift!(add_hours, MS_PER_HOUR);
    fractional_shift!(add_minutes, MS_PER_MINUTE);
    fractional_shift!(add_seconds, MS_PER_SECOND);
    fractional_shift!(add_milliseconds, 1.0);
}

/// Offset conversions for [`DateTime<FixedOffset>`]. The instant is unchanged.
pub trait OffsetPipelineExt {
    /// Express the value with a `+00:00` offset.
    fn to_utc_offset(&self) -> &Self;

    /// Express the value with the host's local offset at that instant.
    fn to_local_offset(&self) -> &Self;
}

impl OffsetPipelineExt for PipelineBuilder<DateTime<FixedOffset>> {
    fn to_utc_offset(&self) -> &Self {
        self.with_transform(Step::new("to_utc_offset", |value: &mut DateTime<FixedOffset>| {
            *value = value.with_timezone(&Utc.fix());
            Ok(())
        }))
    }

    fn to_local_offset(&self) -> &Self {
        self.with_transform(Step::new("to_local_offset", |value: &mut DateTime<FixedOffset>| {
            *value = value.with_timezone(&Local).fixed_offset();
            Ok(())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::run;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap()
    }

    #[test]
    fn test_add_and_subtract() {
        let b = PipelineBuilder::<DateTime<Utc>>::new();
        b.add(TimeDelta::hours(5)).subtract(TimeDelta::hours(2));
        assert_eq!(run(&b, utc(2024, 1, 1, 0)).unwrap(), utc(2024, 1, 1, 3));
    }

    #[test]
    fn test_month_end_is_clamped() {
        let b = PipelineBuilder::<DateTime<Utc>>::new();
        b.add_months(1);
        assert_eq!(run(&b, utc(2024, 1, 31, 8)).unwrap(), utc(2024, 2, 29, 8));

        let b = PipelineBuilder::<DateTime<Utc>>::new();
        b.add_years(-1);
        assert_eq!(run(&b, utc(2024, 2, 29, 0)).unwrap(), utc(2023, 2, 28, 0));
    }

    #[test]
    fn test_fractional_units() {
        let b = PipelineBuilder::<DateTime<Utc>>::new();
        b.add_days(1.5).add_hours(-0.5).add_minutes(30.0);
        assert_eq!(run(&b, utc(2024, 6, 1, 0)).unwrap(), utc(2024, 6, 2, 12));

        let b = PipelineBuilder::<DateTime<Utc>>::new();
        b.add_seconds(1.25).add_milliseconds(-250.0);
        let start = utc(2024, 6, 1, 0);
        assert_eq!(run(&b, start).unwrap(), start + TimeDelta::seconds(1));
    }

    #[test]
    fn test_out_of_range_fails_at_execution() {
        let b = PipelineBuilder::<DateTime<Utc>>::new();
        b.add_days(1.0);

        let err = run(&b, DateTime::<Utc>::MAX_UTC).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TransformError>(),
            Some(TransformError::DateOutOfRange("add_days"))
        ));

        let b = PipelineBuilder::<DateTime<Utc>>::new();
        b.add_hours(f64::INFINITY);
        assert!(run(&b, utc(2024, 1, 1, 0)).is_err());
    }

    #[test]
    fn test_offset_conversion_keeps_instant() {
        let original = DateTime::parse_from_rfc3339("2024-03-10T12:00:00+05:00").unwrap();

        let b = PipelineBuilder::<DateTime<FixedOffset>>::new();
        b.to_utc_offset();
        let converted = run(&b, original).unwrap();
        assert_eq!(converted.to_rfc3339(), "2024-03-10T07:00:00+00:00");
        assert_eq!(converted, original);

        let b = PipelineBuilder::<DateTime<FixedOffset>>::new();
        b.to_local_offset();
        assert_eq!(run(&b, original).unwrap(), original);
    }
}
