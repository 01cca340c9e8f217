use crate::duration::{ConversionError, Duration};

impl From<time::Duration> for Duration {
    /// Converts a [`time::Duration`], saturating to an infinite duration if it is too
    /// large.
    fn from(value: time::Duration) -> Self {
        Self::from_total_nanos(value.whole_nanoseconds())
    }
}

impl TryFrom<Duration> for time::Duration {
    type Error = ConversionError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        let (secs, nanos) = value.try_to_secs_nanos()?;
        Ok(Self::new(secs, nanos))
    }
}
