use crate::{duration::Duration, unit::DurationUnit};

impl Duration {
    /// Splits the duration into whole seconds and the remaining nanoseconds.
    ///
    /// Both components carry the sign of the duration. An infinite duration returns
    /// [`i64::MAX`] / [`i64::MIN`] seconds and zero nanoseconds.
    pub fn to_components_secs(&self) -> (i64, i32) {
        if self.is_infinite() {
            return (self.whole_seconds(), 0);
        }

        (
            self.whole_in(DurationUnit::Seconds),
            self.nanoseconds_component(),
        )
    }

    /// Splits the duration into whole minutes, seconds and nanoseconds.
    pub fn to_components_mins(&self) -> (i64, i32, i32) {
        if self.is_infinite() {
            return (self.whole_minutes(), 0, 0);
        }

        (
            self.whole_in(DurationUnit::Minutes),
            self.component(DurationUnit::Seconds, 60),
            self.nanoseconds_component(),
        )
    }

    /// Splits the duration into whole hours, minutes, seconds and nanoseconds.
    pub fn to_components_hours(&self) -> (i64, i32, i32, i32) {
        if self.is_infinite() {
            return (self.whole_hours(), 0, 0, 0);
        }

        (
            self.whole_in(DurationUnit::Hours),
            self.component(DurationUnit::Minutes, 60),
            self.component(DurationUnit::Seconds, 60),
            self.nanoseconds_component(),
        )
    }

    /// Splits the duration into whole days, hours, minutes, seconds and nanoseconds.
    ///
    /// Reassembling the components yields the original duration. For infinite durations
    /// only the day component is set, to [`i64::MAX`] / [`i64::MIN`].
    pub fn to_components_days(&self) -> (i64, i32, i32, i32, i32) {
        if self.is_infinite() {
            return (self.whole_days(), 0, 0, 0, 0);
        }

        (
            self.whole_in(DurationUnit::Days),
            self.component(DurationUnit::Hours, 24),
            self.component(DurationUnit::Minutes, 60),
            self.component(DurationUnit::Seconds, 60),
            self.nanoseconds_component(),
        )
    }

    /// Whole units of a finite duration. Any unit from seconds upwards fits an [`i64`].
    fn whole_in(&self, unit: DurationUnit) -> i64 {
        (self.total_nanos() / i128::from(unit.nanos())) as i64
    }

    fn component(&self, unit: DurationUnit, modulo: i128) -> i32 {
        (self.total_nanos() / i128::from(unit.nanos()) % modulo) as i32
    }

    fn nanoseconds_component(&self) -> i32 {
        (self.total_nanos() % i128::from(DurationUnit::Seconds.nanos())) as i32
    }
}
