use chrono::TimeDelta;
use snafu::OptionExt;

use crate::duration::{ConversionError, Duration, std_impl::OutOfRangeSnafu};

impl From<TimeDelta> for Duration {
    /// Converts a [`TimeDelta`], keeping nanosecond precision where it fits and falling
    /// back to milliseconds otherwise.
    fn from(value: TimeDelta) -> Self {
        match value.num_nanoseconds() {
            Some(nanos) => Self::from_total_nanos(nanos.into()),
            None => Self::from_total_millis(value.num_milliseconds().into()),
        }
    }
}

impl TryFrom<Duration> for TimeDelta {
    type Error = ConversionError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        let (secs, nanos) = value.try_to_secs_nanos()?;

        TimeDelta::try_seconds(secs)
            .and_then(|delta| delta.checked_add(&TimeDelta::nanoseconds(nanos.into())))
            .context(OutOfRangeSnafu { duration: value })
    }
}
