use snafu::{Snafu, ensure};

use crate::duration::Duration;

/// Errors which can occur when converting a [`Duration`] into a duration type of another
/// crate.
#[derive(Debug, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConversionError {
    #[snafu(display("the duration {duration} is negative, which the target type cannot represent"))]
    Negative { duration: Duration },

    #[snafu(display("the duration {duration} is infinite, which the target type cannot represent"))]
    Infinite { duration: Duration },

    #[snafu(display("the duration {duration} is out of range of the target type"))]
    OutOfRange { duration: Duration },
}

impl Duration {
    /// Splits a finite duration into whole seconds and the nanosecond remainder, which is
    /// the shape most other duration types are built from.
    pub(crate) fn try_to_secs_nanos(self) -> Result<(i64, i32), ConversionError> {
        ensure!(self.is_finite(), InfiniteSnafu { duration: self });
        Ok(self.to_components_secs())
    }
}

impl From<std::time::Duration> for Duration {
    /// Converts a [`std::time::Duration`], saturating to [`Duration::INFINITE`] if it is
    /// too large.
    fn from(value: std::time::Duration) -> Self {
        Self::from_total_nanos(value.as_nanos().try_into().unwrap_or(i128::MAX))
    }
}

impl TryFrom<Duration> for std::time::Duration {
    type Error = ConversionError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        ensure!(!value.is_negative(), NegativeSnafu { duration: value });

        let (secs, nanos) = value.try_to_secs_nanos()?;

        // Both components are non-negative at this point.
        Ok(Self::new(secs as u64, nanos as u32))
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(std::time::Duration::ZERO, Duration::ZERO)]
    #[case(std::time::Duration::from_millis(1500), Duration::from_millis(1500))]
    #[case(std::time::Duration::new(3661, 7), Duration::from_secs(3661) + Duration::from_nanos(7))]
    #[case(std::time::Duration::from_secs(200 * 365 * 86_400), Duration::from_days(200 * 365))]
    #[case(std::time::Duration::MAX, Duration::INFINITE)]
    fn from_std(#[case] input: std::time::Duration, #[case] expected: Duration) {
        assert_eq!(Duration::from(input), expected);
    }

    #[rstest]
    #[case(Duration::ZERO, std::time::Duration::ZERO)]
    #[case(Duration::from_millis(1500), std::time::Duration::from_millis(1500))]
    #[case(Duration::from_days(200_000), std::time::Duration::from_secs(200_000 * 86_400))]
    fn try_into_std(#[case] input: Duration, #[case] expected: std::time::Duration) {
        assert_eq!(std::time::Duration::try_from(input), Ok(expected));
    }

    #[rstest]
    #[case(Duration::from_nanos(-1), ConversionError::Negative { duration: Duration::from_nanos(-1) })]
    #[case(Duration::NEG_INFINITE, ConversionError::Negative { duration: Duration::NEG_INFINITE })]
    #[case(Duration::INFINITE, ConversionError::Infinite { duration: Duration::INFINITE })]
    fn try_into_std_fails(#[case] input: Duration, #[case] expected: ConversionError) {
        assert_eq!(std::time::Duration::try_from(input), Err(expected));
    }
}
