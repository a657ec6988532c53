//! Money amounts for the dues engine
//!
//! All fees are integer minor units (cents). Conversion to a decimal euro
//! amount only happens when rendering the report.

use rust_decimal::Decimal;
use std::fmt;

/// A non-negative amount in euro cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(pub u32);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    /// Amount as a decimal euro value with two decimal places
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(i64::from(self.0), 2)
    }

    /// Returns `None` on overflow
    pub fn checked_add(self, rhs: Cents) -> Option<Cents> {
        self.0.checked_add(rhs.0).map(Cents)
    }

    pub fn saturating_add(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_add(rhs.0))
    }

    /// Sum of all amounts, or `None` if the total does not fit
    pub fn checked_sum<I: IntoIterator<Item = Cents>>(amounts: I) -> Option<Cents> {
        amounts
            .into_iter()
            .try_fold(Cents::ZERO, |total, amount| total.checked_add(amount))
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Cents(16500), "165.00")]
    #[case(Cents(600), "6.00")]
    #[case(Cents(0), "0.00")]
    #[case(Cents(5), "0.05")]
    fn test_display_as_euros(#[case] amount: Cents, #[case] expected: &str) {
        assert_eq!(amount.to_string(), expected);
    }

    #[test]
    fn test_checked_sum() {
        let total = Cents::checked_sum([Cents(26000), Cents(4000), Cents(4000)]);
        assert_eq!(total, Some(Cents(34000)));
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        assert_eq!(Cents::checked_sum(Vec::<Cents>::new()), Some(Cents::ZERO));
    }

    #[test]
    fn test_overflow_is_detected() {
        assert_eq!(Cents(u32::MAX).checked_add(Cents(1)), None);
        assert_eq!(Cents::checked_sum([Cents(u32::MAX - 5), Cents(3), Cents(3)]), None);
        assert_eq!(Cents(u32::MAX).saturating_add(Cents(1)), Cents(u32::MAX));
    }
}
