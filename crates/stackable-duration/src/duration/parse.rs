use std::{cmp::Ordering, str::FromStr};

use snafu::{ResultExt, Snafu, ensure};
use tracing::{Level, instrument};

use crate::{
    duration::{Duration, human, iso},
    unit::DurationUnit,
};

/// Error variants which can be encountered when parsing a [`Duration`]. Every variant
/// carries the complete, unmodified input.
#[derive(Debug, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ParseDurationError {
    #[snafu(display("invalid duration {input:?}, input is empty"))]
    Empty { input: String },

    #[snafu(display("invalid duration {input:?}, unexpected format"))]
    InvalidFormat { input: String },

    #[snafu(display("invalid duration {input:?}, fragment has no unit"))]
    NoUnit { input: String },

    #[snafu(display("invalid duration {input:?}, unknown unit {unit:?}"))]
    UnknownUnit { input: String, unit: String },

    #[snafu(display(
        "invalid duration {input:?}, invalid fragment order, {current} must be before {previous}"
    ))]
    InvalidUnitOrdering {
        input: String,
        previous: DurationUnit,
        current: DurationUnit,
    },

    #[snafu(display("invalid duration {input:?}, fragment unit {unit} was specified multiple times"))]
    DuplicateUnit { input: String, unit: DurationUnit },

    #[snafu(display("invalid duration {input:?}, only seconds can have a fractional part, found {unit}"))]
    FractionalComponent { input: String, unit: DurationUnit },

    #[snafu(display("invalid duration {input:?}, only the last fragment can have a fractional part"))]
    FractionNotLast { input: String },

    #[snafu(display("invalid duration {input:?}, fragments sum up to an undefined value"))]
    UndefinedSum {
        input: String,
        source: crate::duration::ArithmeticError,
    },
}

impl ParseDurationError {
    /// Returns the input which failed to parse.
    pub fn input(&self) -> &str {
        match self {
            Self::Empty { input }
            | Self::InvalidFormat { input }
            | Self::NoUnit { input }
            | Self::UnknownUnit { input, .. }
            | Self::InvalidUnitOrdering { input, .. }
            | Self::DuplicateUnit { input, .. }
            | Self::FractionalComponent { input, .. }
            | Self::FractionNotLast { input }
            | Self::UndefinedSum { input, .. } => input,
        }
    }
}

/// A single `<sign><whole>[.<fraction>]<unit>` fragment of either text format.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Fragment<'a> {
    pub negative: bool,
    pub whole: &'a str,
    pub fraction: Option<&'a str>,
    pub unit: DurationUnit,
}

/// The sign and the parenthesized body of a duration string, like `-(1h 30m)`.
pub(crate) struct Signed<'a> {
    pub negative: bool,
    pub has_sign: bool,
    pub body: &'a str,
}

impl<'a> Signed<'a> {
    /// Splits off an optional leading sign. Parentheses around the remainder are only
    /// allowed after an explicit sign.
    pub fn split(input: &'a str) -> Self {
        let (negative, has_sign, rest) = match input.as_bytes().first() {
            Some(b'-') => (true, true, &input[1..]),
            Some(b'+') => (false, true, &input[1..]),
            _ => (false, false, input),
        };

        let body = match rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            Some(inner) if has_sign => inner,
            _ => rest,
        };

        Self {
            negative,
            has_sign,
            body,
        }
    }

    pub fn apply(&self, duration: Duration) -> Duration {
        if self.negative { -duration } else { duration }
    }
}

/// Splits a leading `[+|-]<digits>[.<digits>]` number off `input`. Returns the sign, the
/// whole and the optional fractional digits, and the rest of the input.
pub(crate) fn split_number(input: &str) -> Option<(bool, &str, Option<&str>, &str)> {
    let (negative, rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let (whole, rest) = split_digits(rest);
    if whole.is_empty() {
        return None;
    }

    match rest.strip_prefix('.') {
        Some(rest) => {
            let (fraction, rest) = split_digits(rest);
            (!fraction.is_empty()).then_some((negative, whole, Some(fraction), rest))
        }
        None => Some((negative, whole, None, rest)),
    }
}

fn split_digits(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    input.split_at(end)
}

/// Validates that fragment units are strictly descending and sums them up.
pub(crate) fn accumulate(input: &str, fragments: &[Fragment<'_>]) -> Result<Duration, ParseDurationError> {
    let mut duration = Duration::ZERO;
    let mut last_unit: Option<DurationUnit> = None;

    for fragment in fragments {
        if let Some(previous) = last_unit {
            match fragment.unit.cmp(&previous) {
                Ordering::Greater => {
                    return InvalidUnitOrderingSnafu {
                        input,
                        previous,
                        current: fragment.unit,
                    }
                    .fail();
                }
                Ordering::Equal => {
                    return DuplicateUnitSnafu {
                        input,
                        unit: fragment.unit,
                    }
                    .fail();
                }
                Ordering::Less => (),
            }
        }

        duration = duration
            .try_add(fragment.to_duration())
            .context(UndefinedSumSnafu { input })?;
        last_unit = Some(fragment.unit);
    }

    Ok(duration)
}

impl Fragment<'_> {
    fn to_duration(&self) -> Duration {
        // Only ASCII digits reach this point, so the only possible failure is overflow,
        // which saturates.
        let whole = self.whole.parse::<i64>().unwrap_or(i64::MAX);
        let mut duration = Duration::from_unit(whole, self.unit);

        if let Some(fraction) = self.fraction {
            let fraction = format!("0.{fraction}").parse::<f64>().unwrap_or_default();
            if let Ok(fraction) = Duration::try_from_unit_f64(fraction, self.unit) {
                // The whole part is finite or positive infinity, neither sums to NaN with a
                // finite positive fraction.
                duration = duration.try_add(fraction).unwrap_or(duration);
            }
        }

        if self.negative { -duration } else { duration }
    }
}

impl Duration {
    /// Parses a duration from either the human-readable format (`1h 30m`) or the
    /// ISO-8601 format (`PT1H30M`).
    #[instrument(level = Level::TRACE)]
    pub fn parse(input: &str) -> Result<Self, ParseDurationError> {
        ensure!(!input.is_empty(), EmptySnafu { input });

        let signed = Signed::split(input);
        ensure!(
            !(signed.has_sign && signed.body.starts_with(['+', '-'])),
            InvalidFormatSnafu { input }
        );

        let result = if signed.body.starts_with('P') {
            iso::parse_body(input, signed.body)
        } else {
            human::parse_body(input, signed.body)
        };

        result
            .map(|duration| signed.apply(duration))
            .inspect_err(|err| tracing::debug!(%err, "failed to parse duration"))
    }

    /// Parses a duration in the ISO-8601 format, like `PT1H30M` or `-P2DT12H`.
    #[instrument(level = Level::TRACE)]
    pub fn parse_iso(input: &str) -> Result<Self, ParseDurationError> {
        ensure!(!input.is_empty(), EmptySnafu { input });

        let signed = Signed::split(input);
        iso::parse_body(input, signed.body)
            .map(|duration| signed.apply(duration))
            .inspect_err(|err| tracing::debug!(%err, "failed to parse ISO-8601 duration"))
    }

    /// Same as [`Duration::parse`], but returns [`None`] instead of an error.
    pub fn parse_or_none(input: &str) -> Option<Self> {
        Self::parse(input).ok()
    }

    /// Same as [`Duration::parse_iso`], but returns [`None`] instead of an error.
    pub fn parse_iso_or_none(input: &str) -> Option<Self> {
        Self::parse_iso(input).ok()
    }
}

impl FromStr for Duration {
    type Err = ParseDurationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}
