//! The ISO-8601 format, like `PT1H30M` or `P2DT0.5S`. Years, months and weeks are not
//! supported, as their length depends on a calendar.

use std::fmt::{Display, Write};

use snafu::{OptionExt, ensure};

use crate::{
    duration::{
        Duration,
        human::write_fractional,
        parse::{
            Fragment, FractionalComponentSnafu, InvalidFormatSnafu, NoUnitSnafu,
            ParseDurationError, UnknownUnitSnafu, accumulate, split_number,
        },
    },
    unit::DurationUnit,
};

/// Infinite durations are rendered with a fixed number of hours, larger than any finite
/// duration.
const INFINITE_ISO: &str = "PT9999999999999H";

impl Duration {
    /// Renders the duration in the ISO-8601 format, like `PT1H30M`, `P1D` or `-PT0.5S`.
    ///
    /// Only days, hours, minutes and seconds are used. Zero renders as `PT0S`. The seconds
    /// can have up to nine fractional digits, trailing zeros are trimmed.
    pub fn to_iso_string(&self) -> String {
        IsoFormat(self).to_string()
    }
}

/// Formats the wrapped [`Duration`] in the ISO-8601 format.
struct IsoFormat<'a>(&'a Duration);

impl Display for IsoFormat<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let duration = self.0;

        if duration.is_negative() {
            f.write_char('-')?;
        }

        if duration.is_infinite() {
            return f.write_str(INFINITE_ISO);
        }

        let (days, hours, minutes, seconds, nanos) = duration.abs().to_components_days();

        let has_hours = hours != 0;
        let has_seconds = seconds != 0 || nanos != 0;
        let has_minutes = minutes != 0 || (has_seconds && has_hours);

        f.write_char('P')?;

        if days != 0 {
            write!(f, "{days}D")?;
        }

        if !has_hours && !has_minutes && !has_seconds && days != 0 {
            return Ok(());
        }

        f.write_char('T')?;

        if has_hours {
            write!(f, "{hours}H")?;
        }

        if has_minutes {
            write!(f, "{minutes}M")?;
        }

        if has_seconds || (!has_hours && !has_minutes) {
            write_fractional(f, seconds.into(), nanos, 9, "S", false)?;
        }

        Ok(())
    }
}

/// Parses the (sign-less and parenthesis-less) body of the ISO-8601 format.
pub(crate) fn parse_body(input: &str, body: &str) -> Result<Duration, ParseDurationError> {
    let mut rest = body
        .strip_prefix('P')
        .context(InvalidFormatSnafu { input })?;
    ensure!(!rest.is_empty(), InvalidFormatSnafu { input });

    let mut in_time = false;
    let mut fragments = Vec::new();

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('T') {
            ensure!(!in_time && !after.is_empty(), InvalidFormatSnafu { input });

            in_time = true;
            rest = after;
            continue;
        }

        let (negative, whole, fraction, after) =
            split_number(rest).context(InvalidFormatSnafu { input })?;

        let mut chars = after.chars();
        let designator = chars.next().context(NoUnitSnafu { input })?;

        let unit = match (designator, in_time) {
            ('D', false) => DurationUnit::Days,
            ('H', true) => DurationUnit::Hours,
            ('M', true) => DurationUnit::Minutes,
            ('S', true) => DurationUnit::Seconds,
            _ => {
                return UnknownUnitSnafu {
                    input,
                    unit: designator.to_string(),
                }
                .fail();
            }
        };

        if fraction.is_some() {
            ensure!(
                unit == DurationUnit::Seconds,
                FractionalComponentSnafu { input, unit }
            );
        }

        fragments.push(Fragment {
            negative,
            whole,
            fraction,
            unit,
        });

        rest = chars.as_str();
    }

    accumulate(input, &fragments)
}
