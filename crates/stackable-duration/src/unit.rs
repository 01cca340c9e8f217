use std::cmp::Ordering;

/// Supported [`DurationUnit`]s, ordered from the smallest to the largest one. The order of
/// variants **MATTERS**. Parsers rely on it to enforce strictly descending fragments and
/// the text formats iterate over it in reverse.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum DurationUnit {
    #[strum(serialize = "ns")]
    Nanoseconds,

    #[strum(serialize = "us")]
    Microseconds,

    #[strum(serialize = "ms")]
    Milliseconds,

    #[strum(serialize = "s")]
    Seconds,

    #[strum(serialize = "m")]
    Minutes,

    #[strum(serialize = "h")]
    Hours,

    #[strum(serialize = "d")]
    Days,
}

impl DurationUnit {
    /// Returns the number of nanoseconds in one of this unit.
    pub const fn nanos(&self) -> i64 {
        match self {
            Self::Nanoseconds => 1,
            Self::Microseconds => 1_000,
            Self::Milliseconds => 1_000_000,
            Self::Seconds => 1_000_000_000,
            Self::Minutes => 60_000_000_000,
            Self::Hours => 3_600_000_000_000,
            Self::Days => 86_400_000_000_000,
        }
    }

    /// Returns the short name used by the human-readable format, like `ms` or `d`.
    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

/// Converts `value` from one unit into another one.
///
/// Converting into a smaller unit multiplies with an overflow check and saturates at
/// [`i64::MIN`] / [`i64::MAX`]. Converting into a larger unit truncates toward zero.
pub fn convert(value: i64, from: DurationUnit, to: DurationUnit) -> i64 {
    match from.cmp(&to) {
        Ordering::Equal => value,
        Ordering::Greater => {
            let factor = from.nanos() / to.nanos();
            value.checked_mul(factor).unwrap_or(if value > 0 {
                i64::MAX
            } else {
                i64::MIN
            })
        }
        Ordering::Less => value / (to.nanos() / from.nanos()),
    }
}

/// Converts a floating point `value` from one unit into another one.
pub fn convert_f64(value: f64, from: DurationUnit, to: DurationUnit) -> f64 {
    match from.cmp(&to) {
        Ordering::Equal => value,
        Ordering::Greater => value * (from.nanos() / to.nanos()) as f64,
        Ordering::Less => value / (to.nanos() / from.nanos()) as f64,
    }
}
