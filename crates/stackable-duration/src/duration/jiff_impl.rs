use jiff::SignedDuration;

use crate::duration::{ConversionError, Duration};

impl From<SignedDuration> for Duration {
    fn from(value: SignedDuration) -> Self {
        Self::from_total_nanos(value.as_nanos())
    }
}

impl TryFrom<Duration> for SignedDuration {
    type Error = ConversionError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        let (secs, nanos) = value.try_to_secs_nanos()?;
        Ok(SignedDuration::new(secs, nanos))
    }
}
