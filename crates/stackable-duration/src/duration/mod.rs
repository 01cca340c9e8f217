//! This module contains the signed [`Duration`] type. It covers spans from single
//! nanoseconds up to roughly 146 million years and saturates to [`Duration::INFINITE`] /
//! [`Duration::NEG_INFINITE`] instead of overflowing.
//!
//! Values up to roughly 146 years are stored with nanosecond precision. Larger values are
//! transparently stored in milliseconds, dropping the sub-millisecond part (truncated
//! toward zero). Storage never switches back from milliseconds to nanoseconds for a value,
//! every magnitude has exactly one representation.
//!
//! Two text formats are supported, see [`Duration::to_iso_string`] and the [`Display`]
//! implementation. Both are accepted by [`FromStr`][std::str::FromStr].
//!
//! [`Display`]: std::fmt::Display

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use snafu::{Snafu, ensure};

use crate::unit::{DurationUnit, convert, convert_f64};

mod components;
mod human;
mod iso;
mod ops;
mod parse;
mod std_impl;

#[cfg(feature = "chrono")]
mod chrono_impl;

#[cfg(feature = "jiff")]
mod jiff_impl;

#[cfg(feature = "schemars")]
mod schemars_impl;

#[cfg(feature = "serde")]
mod serde_impl;

#[cfg(feature = "time")]
mod time_impl;

pub use ops::ArithmeticError;
pub use parse::ParseDurationError;
pub use std_impl::ConversionError;

const NANOS_IN_MILLIS: i64 = 1_000_000;

/// The largest magnitude stored with nanosecond precision. Converting it into any unit up
/// to days never overflows an [`i64`].
pub(crate) const MAX_NANOS: i64 = i64::MAX / 2 / NANOS_IN_MILLIS * NANOS_IN_MILLIS - 1;

/// The largest magnitude stored with millisecond precision. Reaching it means infinity.
pub(crate) const MAX_MILLIS: i64 = i64::MAX / 2;

const MAX_NANOS_IN_MILLIS: i64 = MAX_NANOS / NANOS_IN_MILLIS;

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum InvalidValueError {
    #[snafu(display("invalid duration value, NaN cannot be converted into a duration"))]
    NotANumber,
}

/// The internal storage of a [`Duration`].
#[derive(Clone, Copy, Debug)]
enum Raw {
    /// `|value| <= MAX_NANOS`
    Nanos(i64),

    /// `MAX_NANOS_IN_MILLIS < |value| <= MAX_MILLIS`
    Millis(i64),
}

/// A signed, immutable span of time.
///
/// Equality, ordering and hashing are based on the exact nanosecond count of the stored
/// value, after any precision loss caused by millisecond storage.
#[derive(Clone, Copy, Debug)]
pub struct Duration(Raw);

impl Duration {
    /// A duration of zero length.
    pub const ZERO: Self = Self(Raw::Nanos(0));

    /// The positive infinite duration. Every overflowing positive result saturates to it.
    pub const INFINITE: Self = Self(Raw::Millis(MAX_MILLIS));

    /// The negative infinite duration. Every overflowing negative result saturates to it.
    pub const NEG_INFINITE: Self = Self(Raw::Millis(-MAX_MILLIS));

    /// Creates a new [`Duration`] of `value` times `unit`.
    ///
    /// Magnitudes which don't fit the nanosecond range are stored in milliseconds, values
    /// beyond the millisecond range saturate to an infinite duration.
    pub fn from_unit(value: i64, unit: DurationUnit) -> Self {
        match value.checked_mul(unit.nanos()) {
            Some(nanos) if nanos.unsigned_abs() <= MAX_NANOS.unsigned_abs() => {
                Self(Raw::Nanos(nanos))
            }
            _ => Self::from_total_millis(
                convert(value, unit, DurationUnit::Milliseconds).into(),
            ),
        }
    }

    /// Creates a new [`Duration`] of the floating point `value` times `unit`.
    ///
    /// The value is rounded to the nearest nanosecond, or to the nearest millisecond if it
    /// is outside of the nanosecond range. Infinite and overflowing values saturate.
    pub fn try_from_unit_f64(value: f64, unit: DurationUnit) -> Result<Self, InvalidValueError> {
        ensure!(!value.is_nan(), NotANumberSnafu);

        let nanos = convert_f64(value, unit, DurationUnit::Nanoseconds).round();
        if nanos.abs() <= MAX_NANOS as f64 {
            return Ok(Self(Raw::Nanos(nanos as i64)));
        }

        let millis = convert_f64(value, unit, DurationUnit::Milliseconds).round();
        Ok(Self::from_total_millis(millis as i128))
    }

    pub fn from_nanos(nanos: i64) -> Self {
        Self::from_unit(nanos, DurationUnit::Nanoseconds)
    }

    pub fn from_micros(micros: i64) -> Self {
        Self::from_unit(micros, DurationUnit::Microseconds)
    }

    pub fn from_millis(millis: i64) -> Self {
        Self::from_unit(millis, DurationUnit::Milliseconds)
    }

    /// Creates a new [`Duration`] from the specified number of whole seconds.
    pub fn from_secs(secs: i64) -> Self {
        Self::from_unit(secs, DurationUnit::Seconds)
    }

    pub fn from_mins(minutes: i64) -> Self {
        Self::from_unit(minutes, DurationUnit::Minutes)
    }

    pub fn from_hours(hours: i64) -> Self {
        Self::from_unit(hours, DurationUnit::Hours)
    }

    pub fn from_days(days: i64) -> Self {
        Self::from_unit(days, DurationUnit::Days)
    }

    /// Creates a new [`Duration`] from the specified number of (fractional) seconds.
    pub fn try_from_secs_f64(secs: f64) -> Result<Self, InvalidValueError> {
        Self::try_from_unit_f64(secs, DurationUnit::Seconds)
    }

    /// Builds a duration from an exact nanosecond count, promoting it to millisecond
    /// storage (truncated toward zero) if needed.
    pub(crate) fn from_total_nanos(nanos: i128) -> Self {
        if nanos.unsigned_abs() <= MAX_NANOS.unsigned_abs().into() {
            // Guarded by the range check above.
            Self(Raw::Nanos(nanos as i64))
        } else {
            Self::from_total_millis(nanos / i128::from(NANOS_IN_MILLIS))
        }
    }

    /// Builds a duration from a millisecond count, which saturates at
    /// [`Duration::INFINITE`] / [`Duration::NEG_INFINITE`].
    pub(crate) fn from_total_millis(millis: i128) -> Self {
        if millis.unsigned_abs() <= MAX_NANOS_IN_MILLIS.unsigned_abs().into() {
            Self(Raw::Nanos(millis as i64 * NANOS_IN_MILLIS))
        } else {
            let max = i128::from(MAX_MILLIS);
            if millis.unsigned_abs() >= max.unsigned_abs() {
                tracing::trace!(millis, "duration saturated to infinity");
            }

            Self(Raw::Millis(millis.clamp(-max, max) as i64))
        }
    }

    /// Returns the exact number of nanoseconds represented by this duration. Infinite
    /// durations return their (out of range) millisecond bound in nanoseconds.
    pub(crate) fn total_nanos(&self) -> i128 {
        match self.0 {
            Raw::Nanos(nanos) => nanos.into(),
            Raw::Millis(millis) => i128::from(millis) * i128::from(NANOS_IN_MILLIS),
        }
    }

    /// The unit the value is stored in, either nanoseconds or milliseconds.
    pub(crate) fn storage_unit(&self) -> DurationUnit {
        match self.0 {
            Raw::Nanos(_) => DurationUnit::Nanoseconds,
            Raw::Millis(_) => DurationUnit::Milliseconds,
        }
    }

    fn storage_value(&self) -> i64 {
        match self.0 {
            Raw::Nanos(value) | Raw::Millis(value) => value,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.storage_value() == 0
    }

    pub fn is_negative(&self) -> bool {
        self.storage_value() < 0
    }

    pub fn is_positive(&self) -> bool {
        self.storage_value() > 0
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self.0, Raw::Millis(millis) if millis.unsigned_abs() == MAX_MILLIS.unsigned_abs())
    }

    pub fn is_finite(&self) -> bool {
        !self.is_infinite()
    }

    /// Returns the value of this duration in `unit`, truncated toward zero.
    ///
    /// Infinite durations return [`i64::MAX`] / [`i64::MIN`], as do finite values which
    /// don't fit an [`i64`] in the requested unit.
    pub fn to_unit(&self, unit: DurationUnit) -> i64 {
        if self.is_infinite() {
            return if self.is_positive() { i64::MAX } else { i64::MIN };
        }

        convert(self.storage_value(), self.storage_unit(), unit)
    }

    /// Returns the value of this duration in `unit` as a floating point number.
    ///
    /// Infinite durations return [`f64::INFINITY`] / [`f64::NEG_INFINITY`].
    pub fn to_unit_f64(&self, unit: DurationUnit) -> f64 {
        if self.is_infinite() {
            return if self.is_positive() {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }

        convert_f64(self.storage_value() as f64, self.storage_unit(), unit)
    }

    pub fn whole_days(&self) -> i64 {
        self.to_unit(DurationUnit::Days)
    }

    pub fn whole_hours(&self) -> i64 {
        self.to_unit(DurationUnit::Hours)
    }

    pub fn whole_minutes(&self) -> i64 {
        self.to_unit(DurationUnit::Minutes)
    }

    pub fn whole_seconds(&self) -> i64 {
        self.to_unit(DurationUnit::Seconds)
    }

    pub fn whole_milliseconds(&self) -> i64 {
        self.to_unit(DurationUnit::Milliseconds)
    }

    pub fn whole_microseconds(&self) -> i64 {
        self.to_unit(DurationUnit::Microseconds)
    }

    pub fn whole_nanoseconds(&self) -> i64 {
        self.to_unit(DurationUnit::Nanoseconds)
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Duration {
    fn eq(&self, other: &Self) -> bool {
        self.total_nanos() == other.total_nanos()
    }
}

impl Eq for Duration {}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_nanos().cmp(&other.total_nanos())
    }
}

impl Hash for Duration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.total_nanos().hash(state);
    }
}
