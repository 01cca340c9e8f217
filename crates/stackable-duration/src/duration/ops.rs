use std::{
    cmp::Ordering,
    iter::Sum,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use snafu::{Snafu, ensure};

use crate::{duration::Duration, unit::DurationUnit};

/// Arithmetic on [`Duration`]s which has no defined result. Overflow is never an error,
/// it saturates to an infinite duration instead.
#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum ArithmeticError {
    #[snafu(display("infinite durations cannot be summed when their signs differ"))]
    InfiniteSumOfOppositeSigns,

    #[snafu(display("an infinite duration cannot be multiplied by zero"))]
    InfiniteTimesZero,

    #[snafu(display("a zero duration cannot be divided by zero"))]
    ZeroDividedByZero,

    #[snafu(display("the result of the operation is not a number"))]
    NotANumber,
}

impl Duration {
    /// Adds two durations.
    ///
    /// Overflow saturates to an infinite duration. Adding infinite durations of opposite
    /// signs has no defined result and returns an error.
    pub fn try_add(self, rhs: Self) -> Result<Self, ArithmeticError> {
        match (self.is_infinite(), rhs.is_infinite()) {
            (true, true) => {
                ensure!(
                    self.is_positive() == rhs.is_positive(),
                    InfiniteSumOfOppositeSignsSnafu
                );
                Ok(self)
            }
            (true, false) => Ok(self),
            (false, true) => Ok(rhs),
            // Both magnitudes are below 2^83, the sum cannot overflow an i128.
            (false, false) => Ok(Self::from_total_nanos(
                self.total_nanos() + rhs.total_nanos(),
            )),
        }
    }

    /// Subtracts `rhs` from `self`, which is the same as adding `-rhs`.
    pub fn try_sub(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.try_add(-rhs)
    }

    /// Multiplies the duration by an integer scale.
    ///
    /// Multiplying an infinite duration by zero returns an error. Overflow saturates to an
    /// infinite duration with the sign of the product.
    pub fn try_mul(self, scale: i64) -> Result<Self, ArithmeticError> {
        if self.is_infinite() {
            ensure!(scale != 0, InfiniteTimesZeroSnafu);
            return Ok(self.with_sign_of(scale.signum()));
        }

        if scale == 0 || self.is_zero() {
            return Ok(Self::ZERO);
        }

        match self.total_nanos().checked_mul(scale.into()) {
            Some(nanos) => Ok(Self::from_total_nanos(nanos)),
            None => Ok(Self::infinite_with_sign(self.signum() * scale.signum())),
        }
    }

    /// Multiplies the duration by a floating point scale.
    ///
    /// Integral scales are handled exactly by [`Duration::try_mul`]. Everything else is
    /// computed in floating point in the storage unit of the duration and rounded. NaN
    /// results, like zero times infinity, return an error.
    pub fn try_mul_f64(self, scale: f64) -> Result<Self, ArithmeticError> {
        if let Some(scale) = as_integral(scale) {
            return self.try_mul(scale);
        }

        let unit = self.storage_unit();
        Self::from_f64_result(self.to_unit_f64(unit) * scale, unit)
    }

    /// Divides the duration by an integer scale, truncating toward zero.
    ///
    /// Dividing by zero returns an infinite duration with the sign of `self`, dividing a
    /// zero duration by zero returns an error.
    pub fn try_div(self, scale: i64) -> Result<Self, ArithmeticError> {
        if scale == 0 {
            return match self.signum() {
                0 => ZeroDividedByZeroSnafu.fail(),
                sign => Ok(Self::infinite_with_sign(sign)),
            };
        }

        if self.is_infinite() {
            return Ok(self.with_sign_of(scale.signum()));
        }

        Ok(Self::from_total_nanos(self.total_nanos() / i128::from(scale)))
    }

    /// Divides the duration by a floating point scale.
    ///
    /// Integral, nonzero scales are handled exactly by [`Duration::try_div`]. Everything
    /// else follows IEEE 754 semantics, including the sign of a zero divisor. NaN results,
    /// like zero divided by zero, return an error.
    pub fn try_div_f64(self, scale: f64) -> Result<Self, ArithmeticError> {
        if let Some(scale) = as_integral(scale).filter(|scale| *scale != 0) {
            return self.try_div(scale);
        }

        let unit = self.storage_unit();
        Self::from_f64_result(self.to_unit_f64(unit) / scale, unit)
    }

    /// Returns the ratio of two durations.
    ///
    /// Unlike division by a scalar, this never fails: dividing zero by zero or infinity by
    /// infinity returns NaN.
    pub fn ratio(self, other: Self) -> f64 {
        let unit = self.storage_unit().max(other.storage_unit());
        self.to_unit_f64(unit) / other.to_unit_f64(unit)
    }

    /// Returns the absolute value of this duration.
    pub fn abs(self) -> Self {
        if self.is_negative() { -self } else { self }
    }

    /// Returns `-1`, `0` or `1` depending on the sign of the duration.
    pub fn signum(&self) -> i64 {
        match self.cmp(&Self::ZERO) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    fn infinite_with_sign(sign: i64) -> Self {
        if sign < 0 {
            Self::NEG_INFINITE
        } else {
            Self::INFINITE
        }
    }

    fn with_sign_of(self, sign: i64) -> Self {
        if sign < 0 { -self } else { self }
    }

    fn from_f64_result(value: f64, unit: DurationUnit) -> Result<Self, ArithmeticError> {
        ensure!(!value.is_nan(), NotANumberSnafu);

        // NaN is the only value rejected when converting back.
        Self::try_from_unit_f64(value, unit).map_err(|_| ArithmeticError::NotANumber)
    }
}

/// Returns the scale as an integer if it has no fractional part and fits an [`i64`].
fn as_integral(scale: f64) -> Option<i64> {
    let in_range = (i64::MIN as f64..i64::MAX as f64).contains(&scale);
    (in_range && scale.fract() == 0.0).then_some(scale as i64)
}

impl Neg for Duration {
    type Output = Self;

    fn neg(self) -> Self::Output {
        use crate::duration::Raw;

        match self.0 {
            Raw::Nanos(nanos) => Self(Raw::Nanos(-nanos)),
            Raw::Millis(millis) => Self(Raw::Millis(-millis)),
        }
    }
}

/// Unwraps the result of an operator which only fails on undefined results, matching the
/// panicking behaviour of the std operators.
#[allow(clippy::panic)]
fn defined(result: Result<Duration, ArithmeticError>) -> Duration {
    result.unwrap_or_else(|err| panic!("{err}"))
}

/// # Panics
///
/// Panics if both durations are infinite with opposite signs.
impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        defined(self.try_add(rhs))
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// # Panics
///
/// Panics if both durations are infinite with the same sign.
impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        defined(self.try_sub(rhs))
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<i64> for Duration {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        defined(self.try_mul(rhs))
    }
}

impl Mul<i32> for Duration {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        defined(self.try_mul(rhs.into()))
    }
}

impl Mul<f64> for Duration {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        defined(self.try_mul_f64(rhs))
    }
}

impl Mul<Duration> for i64 {
    type Output = Duration;

    fn mul(self, rhs: Duration) -> Self::Output {
        rhs * self
    }
}

impl MulAssign<i64> for Duration {
    fn mul_assign(&mut self, rhs: i64) {
        *self = *self * rhs;
    }
}

impl MulAssign<f64> for Duration {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Div<i64> for Duration {
    type Output = Self;

    fn div(self, rhs: i64) -> Self::Output {
        defined(self.try_div(rhs))
    }
}

impl Div<i32> for Duration {
    type Output = Self;

    fn div(self, rhs: i32) -> Self::Output {
        defined(self.try_div(rhs.into()))
    }
}

impl Div<f64> for Duration {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        defined(self.try_div_f64(rhs))
    }
}

impl DivAssign<i64> for Duration {
    fn div_assign(&mut self, rhs: i64) {
        *self = *self / rhs;
    }
}

impl DivAssign<f64> for Duration {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl Div for Duration {
    type Output = f64;

    fn div(self, rhs: Self) -> Self::Output {
        self.ratio(rhs)
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::add)
    }
}

impl<'a> Sum<&'a Duration> for Duration {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use rstest_reuse::*;

    use super::*;
    use crate::duration::{MAX_MILLIS, MAX_NANOS};

    #[template]
    #[rstest]
    #[case(Duration::from_secs(1), Duration::from_millis(500), Duration::from_millis(1500))]
    #[case(Duration::from_hours(1), Duration::from_mins(-30), Duration::from_mins(30))]
    #[case(Duration::from_nanos(MAX_NANOS), Duration::from_nanos(1), Duration::from_nanos(MAX_NANOS + 1))]
    #[case(Duration::from_days(100_000), Duration::from_days(-100_000), Duration::ZERO)]
    fn sum_cases(#[case] lhs: Duration, #[case] rhs: Duration, #[case] expected: Duration) {}

    #[apply(sum_cases)]
    fn add(lhs: Duration, rhs: Duration, expected: Duration) {
        assert_eq!(lhs + rhs, expected);
        assert_eq!(rhs + lhs, expected);
    }

    #[apply(sum_cases)]
    fn sub(lhs: Duration, rhs: Duration, expected: Duration) {
        assert_eq!(expected - rhs, lhs);
        assert_eq!(expected - lhs, rhs);
    }

    #[test]
    fn add_truncates_to_millis() {
        // 200_000 days are stored in milliseconds, the nanosecond is truncated away.
        let sum = Duration::from_days(200_000) + Duration::from_nanos(-1);
        assert_eq!(sum, Duration::from_millis(17_279_999_999_999));
        assert_eq!(sum.whole_nanoseconds(), i64::MAX);
    }

    #[rstest]
    #[case(Duration::INFINITE, Duration::from_days(1), Duration::INFINITE)]
    #[case(Duration::NEG_INFINITE, Duration::from_days(1), Duration::NEG_INFINITE)]
    #[case(Duration::INFINITE, Duration::INFINITE, Duration::INFINITE)]
    #[case(Duration::NEG_INFINITE, Duration::NEG_INFINITE, Duration::NEG_INFINITE)]
    #[case(Duration::from_millis(MAX_MILLIS - 1), Duration::from_millis(1), Duration::INFINITE)]
    #[case(Duration::from_millis(MAX_MILLIS - 1), Duration::from_millis(MAX_MILLIS - 1), Duration::INFINITE)]
    #[case(Duration::from_millis(-MAX_MILLIS + 1), Duration::from_nanos(-MAX_NANOS), Duration::NEG_INFINITE)]
    fn add_saturates(#[case] lhs: Duration, #[case] rhs: Duration, #[case] expected: Duration) {
        assert_eq!(lhs.try_add(rhs), Ok(expected));
        assert_eq!(rhs.try_add(lhs), Ok(expected));
    }

    #[rstest]
    #[case(Duration::INFINITE, Duration::NEG_INFINITE)]
    #[case(Duration::NEG_INFINITE, Duration::INFINITE)]
    fn add_opposite_infinities(#[case] lhs: Duration, #[case] rhs: Duration) {
        assert_eq!(
            lhs.try_add(rhs),
            Err(ArithmeticError::InfiniteSumOfOppositeSigns)
        );
        assert_eq!(
            lhs.try_sub(lhs),
            Err(ArithmeticError::InfiniteSumOfOppositeSigns)
        );
        assert_eq!(lhs.try_sub(rhs), Ok(lhs));
    }

    #[test]
    #[should_panic(expected = "infinite durations cannot be summed when their signs differ")]
    fn add_operator_panics_on_opposite_infinities() {
        let _ = Duration::INFINITE + Duration::NEG_INFINITE;
    }

    #[rstest]
    #[case(Duration::from_secs(3), 4, Duration::from_secs(12))]
    #[case(Duration::from_secs(3), -4, Duration::from_secs(-12))]
    #[case(Duration::from_secs(3), 0, Duration::ZERO)]
    #[case(Duration::ZERO, i64::MAX, Duration::ZERO)]
    #[case(Duration::from_days(1), 365_000, Duration::from_days(365_000))]
    #[case(Duration::from_nanos(MAX_NANOS), 2, Duration::from_nanos(MAX_NANOS * 2))]
    #[case(Duration::from_days(-1), i64::MAX, Duration::NEG_INFINITE)]
    #[case(Duration::from_days(-1), i64::MIN, Duration::INFINITE)]
    #[case(Duration::from_days(200_000), i64::MAX, Duration::INFINITE)]
    #[case(Duration::INFINITE, -1, Duration::NEG_INFINITE)]
    #[case(Duration::NEG_INFINITE, 7, Duration::NEG_INFINITE)]
    fn mul(#[case] lhs: Duration, #[case] scale: i64, #[case] expected: Duration) {
        assert_eq!(lhs.try_mul(scale), Ok(expected));
        assert_eq!(lhs * scale, expected);
        assert_eq!(scale * lhs, expected);
    }

    #[rstest]
    #[case(Duration::INFINITE)]
    #[case(Duration::NEG_INFINITE)]
    fn mul_infinite_by_zero(#[case] lhs: Duration) {
        assert_eq!(lhs.try_mul(0), Err(ArithmeticError::InfiniteTimesZero));
        assert_eq!(lhs.try_mul_f64(0.0), Err(ArithmeticError::InfiniteTimesZero));
    }

    #[rstest]
    #[case(Duration::from_secs(3), 1.5, Duration::from_millis(4500))]
    #[case(Duration::from_secs(3), 2.0, Duration::from_secs(6))]
    #[case(Duration::from_secs(1), -0.25, Duration::from_millis(-250))]
    #[case(Duration::from_secs(1), f64::INFINITY, Duration::INFINITE)]
    #[case(Duration::from_secs(-1), f64::INFINITY, Duration::NEG_INFINITE)]
    #[case(Duration::INFINITE, 0.5, Duration::INFINITE)]
    #[case(Duration::INFINITE, -0.5, Duration::NEG_INFINITE)]
    fn mul_f64(#[case] lhs: Duration, #[case] scale: f64, #[case] expected: Duration) {
        assert_eq!(lhs.try_mul_f64(scale), Ok(expected));
    }

    #[rstest]
    #[case(Duration::ZERO, f64::INFINITY)]
    #[case(Duration::from_secs(1), f64::NAN)]
    fn mul_f64_nan(#[case] lhs: Duration, #[case] scale: f64) {
        assert_eq!(lhs.try_mul_f64(scale), Err(ArithmeticError::NotANumber));
    }

    #[rstest]
    #[case(Duration::from_secs(12), 4, Duration::from_secs(3))]
    #[case(Duration::from_nanos(7), 2, Duration::from_nanos(3))]
    #[case(Duration::from_nanos(-7), 2, Duration::from_nanos(-3))]
    #[case(Duration::from_days(200_000), 1_000_000, Duration::from_nanos(17_280_000_000_000))]
    #[case(Duration::from_secs(1), 0, Duration::INFINITE)]
    #[case(Duration::from_secs(-1), 0, Duration::NEG_INFINITE)]
    #[case(Duration::INFINITE, -2, Duration::NEG_INFINITE)]
    #[case(Duration::NEG_INFINITE, 2, Duration::NEG_INFINITE)]
    fn div(#[case] lhs: Duration, #[case] scale: i64, #[case] expected: Duration) {
        assert_eq!(lhs.try_div(scale), Ok(expected));
        assert_eq!(lhs / scale, expected);
    }

    #[test]
    fn div_zero_by_zero() {
        assert_eq!(
            Duration::ZERO.try_div(0),
            Err(ArithmeticError::ZeroDividedByZero)
        );
        assert_eq!(
            Duration::ZERO.try_div_f64(0.0),
            Err(ArithmeticError::NotANumber)
        );
    }

    #[rstest]
    #[case(Duration::from_secs(3), 2.0, Duration::from_millis(1500))]
    #[case(Duration::from_secs(3), 0.5, Duration::from_secs(6))]
    #[case(Duration::from_secs(1), 0.0, Duration::INFINITE)]
    #[case(Duration::from_secs(1), -0.0, Duration::NEG_INFINITE)]
    #[case(Duration::from_secs(-1), -0.0, Duration::INFINITE)]
    #[case(Duration::INFINITE, 1e300, Duration::INFINITE)]
    fn div_f64(#[case] lhs: Duration, #[case] scale: f64, #[case] expected: Duration) {
        assert_eq!(lhs.try_div_f64(scale), Ok(expected));
    }

    #[rstest]
    #[case(Duration::from_secs(1) / -0.0, Duration::NEG_INFINITE)]
    #[case(Duration::from_secs(-1) / 0.0, Duration::NEG_INFINITE)]
    #[case(Duration::from_secs(1) * f64::NEG_INFINITY, Duration::NEG_INFINITE)]
    #[case(Duration::from_days(200_000) * -1e300, Duration::NEG_INFINITE)]
    #[case(Duration::from_secs(1) / f64::NEG_INFINITY, Duration::ZERO)]
    fn float_operators_saturate_to_neg_infinite(#[case] result: Duration, #[case] expected: Duration) {
        assert_eq!(result, expected);
    }

    #[test]
    fn div_f64_infinite_by_infinite() {
        assert_eq!(
            Duration::INFINITE.try_div_f64(f64::INFINITY),
            Err(ArithmeticError::NotANumber)
        );
    }

    #[rstest]
    #[case(Duration::from_hours(1), Duration::from_mins(30), 2.0)]
    #[case(Duration::from_mins(-30), Duration::from_hours(1), -0.5)]
    #[case(Duration::from_days(200_000), Duration::from_days(100_000), 2.0)]
    #[case(Duration::INFINITE, Duration::from_secs(1), f64::INFINITY)]
    fn ratio(#[case] lhs: Duration, #[case] rhs: Duration, #[case] expected: f64) {
        assert_eq!(lhs / rhs, expected);
    }

    #[rstest]
    #[case(Duration::ZERO, Duration::ZERO)]
    #[case(Duration::INFINITE, Duration::INFINITE)]
    #[case(Duration::INFINITE, Duration::NEG_INFINITE)]
    fn ratio_nan(#[case] lhs: Duration, #[case] rhs: Duration) {
        assert!(lhs.ratio(rhs).is_nan());
    }

    #[rstest]
    #[case(Duration::from_secs(-5), Duration::from_secs(5))]
    #[case(Duration::from_secs(5), Duration::from_secs(5))]
    #[case(Duration::NEG_INFINITE, Duration::INFINITE)]
    #[case(Duration::ZERO, Duration::ZERO)]
    #[case(-Duration::ZERO, Duration::ZERO)]
    fn abs(#[case] input: Duration, #[case] expected: Duration) {
        assert_eq!(input.abs(), expected);
    }

    #[test]
    fn neg() {
        assert_eq!(-Duration::INFINITE, Duration::NEG_INFINITE);
        assert_eq!(-Duration::NEG_INFINITE, Duration::INFINITE);
        assert_eq!(-Duration::ZERO, Duration::ZERO);
        assert!(!(-Duration::ZERO).is_negative());
        assert_eq!(-Duration::from_days(200_000), Duration::from_days(-200_000));
    }

    #[rstest]
    #[case(Duration::from_nanos(1))]
    #[case(Duration::from_days(-3))]
    #[case(Duration::from_nanos(MAX_NANOS))]
    #[case(Duration::from_days(1_000_000))]
    fn add_negation_is_zero(#[case] input: Duration) {
        assert_eq!(input + (-input), Duration::ZERO);
        assert!((input - input).is_zero());
    }

    #[test]
    fn assign_ops() {
        let mut duration = Duration::from_secs(20);

        duration += Duration::from_secs(10);
        assert_eq!(duration, Duration::from_secs(30));

        duration -= Duration::from_secs(5);
        assert_eq!(duration, Duration::from_secs(25));

        duration *= 4_i64;
        assert_eq!(duration, Duration::from_secs(100));

        duration /= 8_i64;
        assert_eq!(duration, Duration::from_millis(12_500));

        duration *= 0.5;
        assert_eq!(duration, Duration::from_millis(6_250));

        duration /= 2.5;
        assert_eq!(duration, Duration::from_millis(2_500));
    }

    #[test]
    fn sum() {
        let durations = [
            Duration::from_hours(1),
            Duration::from_mins(30),
            Duration::from_secs(15),
        ];

        let total: Duration = durations.iter().sum();
        assert_eq!(total.whole_seconds(), 5415);
        assert_eq!(durations.into_iter().sum::<Duration>(), total);
    }
}
