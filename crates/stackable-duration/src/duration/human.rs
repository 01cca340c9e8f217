//! The human-readable format, like `1d 2h 30m` or `1.500s`.

use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use snafu::{OptionExt, ensure};

use crate::{
    duration::{
        Duration,
        parse::{
            Fragment, FractionNotLastSnafu, InvalidFormatSnafu, NoUnitSnafu, ParseDurationError,
            UnknownUnitSnafu, accumulate, split_number,
        },
    },
    unit::DurationUnit,
};

const INFINITY: &str = "Infinity";

/// The number of decimals [`Duration::to_string_in`] renders at most.
const MAX_DECIMALS: usize = 12;

impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0{}", DurationUnit::Seconds);
        }

        if self.is_infinite() {
            if self.is_negative() {
                f.write_char('-')?;
            }
            return f.write_str(INFINITY);
        }

        let (days, hours, minutes, seconds, nanos) = self.abs().to_components_days();

        let has_days = days != 0;
        let has_hours = hours != 0;
        let has_minutes = minutes != 0;
        let has_seconds = seconds != 0 || nanos != 0;

        let mut fragments = Vec::new();

        if has_days {
            fragments.push(format!("{days}{}", DurationUnit::Days));
        }

        // Inner fields are kept as zero to avoid gaps, trailing zero fields are dropped.
        if has_hours || (has_days && (has_minutes || has_seconds)) {
            fragments.push(format!("{hours}{}", DurationUnit::Hours));
        }

        if has_minutes || (has_seconds && (has_hours || has_days)) {
            fragments.push(format!("{minutes}{}", DurationUnit::Minutes));
        }

        if has_seconds {
            let mut fragment = String::new();

            if seconds != 0 || has_days || has_hours || has_minutes {
                write_fractional(&mut fragment, seconds.into(), nanos, 9, "s", true)?;
            } else if nanos >= 1_000_000 {
                write_fractional(&mut fragment, (nanos / 1_000_000).into(), nanos % 1_000_000, 6, "ms", true)?;
            } else if nanos >= 1_000 {
                write_fractional(&mut fragment, (nanos / 1_000).into(), nanos % 1_000, 3, "us", true)?;
            } else {
                write!(fragment, "{nanos}{}", DurationUnit::Nanoseconds)?;
            }

            fragments.push(fragment);
        }

        let joined = fragments.join(" ");
        match (self.is_negative(), fragments.len()) {
            (false, _) => f.write_str(&joined),
            (true, 1) => write!(f, "-{joined}"),
            (true, _) => write!(f, "-({joined})"),
        }
    }
}

/// Writes `<whole>[.<fraction>]<unit>`, where `fraction` is zero-padded to `digits`.
///
/// Trailing zeros of the fraction are trimmed. With `grouped`, the fraction keeps
/// trailing zeros up to the next group of three digits, like `1.500s`.
pub(crate) fn write_fractional(
    out: &mut impl Write,
    whole: i64,
    fraction: i32,
    digits: usize,
    unit: &str,
    grouped: bool,
) -> std::fmt::Result {
    write!(out, "{whole}")?;

    if fraction != 0 {
        let padded = format!("{fraction:0digits$}");
        let significant = padded.trim_end_matches('0').len();
        let shown = if grouped {
            significant.div_ceil(3) * 3
        } else {
            significant
        };

        write!(out, ".{}", &padded[..shown])?;
    }

    out.write_str(unit)
}

impl Duration {
    /// Renders the duration in a single `unit` with exactly `decimals` fractional digits
    /// (at most 12), like `1.50h`. Infinite durations render as `Infinity` / `-Infinity`.
    pub fn to_string_in(&self, unit: DurationUnit, decimals: usize) -> String {
        let value = self.to_unit_f64(unit);

        if value.is_infinite() {
            return if value.is_sign_negative() {
                format!("-{INFINITY}")
            } else {
                INFINITY.to_owned()
            };
        }

        let decimals = decimals.min(MAX_DECIMALS);
        let number = format!("{value:.decimals$}");

        // Tiny negative values round to zero, which is rendered without a sign.
        let number = match number.strip_prefix('-') {
            Some(magnitude) if magnitude.bytes().all(|b| b == b'0' || b == b'.') => magnitude,
            _ => &number,
        };

        format!("{number}{unit}")
    }
}

/// Parses the (sign-less and parenthesis-less) body of the human-readable format.
pub(crate) fn parse_body(input: &str, body: &str) -> Result<Duration, ParseDurationError> {
    if body == INFINITY {
        return Ok(Duration::INFINITE);
    }

    let mut rest = body;
    let mut fragments = Vec::new();

    loop {
        if !fragments.is_empty() {
            rest = rest.trim_start_matches(' ');
        }

        let (negative, whole, fraction, after) =
            split_number(rest).context(InvalidFormatSnafu { input })?;

        let unit_len = after
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(after.len());
        let (unit_name, after) = after.split_at(unit_len);

        ensure!(!unit_name.is_empty(), NoUnitSnafu { input });

        let unit = DurationUnit::from_str(unit_name).ok().context(UnknownUnitSnafu {
            input,
            unit: unit_name,
        })?;

        if fraction.is_some() {
            ensure!(after.is_empty(), FractionNotLastSnafu { input });
        }

        fragments.push(Fragment {
            negative,
            whole,
            fraction,
            unit,
        });

        rest = after;
        if rest.is_empty() {
            break;
        }
    }

    accumulate(input, &fragments)
}
