//! This library provides a signed, overflow-safe [`Duration`] type. Instead of wrapping
//! around or panicking on overflow, all arithmetic saturates to [`Duration::INFINITE`] or
//! [`Duration::NEG_INFINITE`].
//!
//! ## Usage
//!
//! Durations can be constructed from any [`DurationUnit`], or parsed from either the
//! human-readable or the ISO-8601 format using Rust's standard
//! [`FromStr`](std::str::FromStr) trait.
//!
//! ```
//! use stackable_duration::{Duration, DurationUnit};
//!
//! let duration: Duration = "1h 30m".parse().expect("valid duration");
//! assert_eq!(duration, Duration::from_mins(90));
//! assert_eq!(duration.to_iso_string(), "PT1H30M");
//!
//! let duration = Duration::parse("PT1.5S").expect("valid ISO-8601 duration");
//! assert_eq!(duration.to_string(), "1.500s");
//! assert_eq!(duration.to_string_in(DurationUnit::Milliseconds, 0), "1500ms");
//! ```
//!
//! Overflowing values saturate to infinity, which behaves like an absorbing value.
//!
//! ```
//! use stackable_duration::Duration;
//!
//! let huge = Duration::from_days(i64::MAX);
//! assert!(huge.is_infinite());
//! assert_eq!(huge + Duration::from_secs(1), Duration::INFINITE);
//! assert_eq!(huge.to_string(), "Infinity");
//!
//! // Undefined results are reported by the checked methods
//! assert!(Duration::INFINITE.try_add(Duration::NEG_INFINITE).is_err());
//! ```
//!
//! ## Features
//!
//! - `serde` (default): (De)serializes durations as strings.
//! - `schemars`: Provides a JSON schema for [`Duration`].
//! - `chrono`, `time` and `jiff`: Conversions to and from the duration types of the
//!   respective crates.

// NOTE: Required for `#[apply]` of rstest_reuse templates in nested test modules.
#[cfg(test)]
use rstest_reuse::{self};

pub mod duration;
pub mod unit;

pub use duration::{
    ArithmeticError, ConversionError, Duration, InvalidValueError, ParseDurationError,
};
pub use unit::DurationUnit;
