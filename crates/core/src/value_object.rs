//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

use core::iter::Sum;
use core::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// - **Value Object**: `Money(145)` equals any other `Money(145)`
/// - **Entity**: an `Item` named "Rice" stays the same item while its quantity changes
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Monetary amount in whole currency units.
///
/// Prices and revenue share this type. No currency or rounding rules apply.
/// Arithmetic saturates at the `i64` bounds instead of overflowing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> i64 {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    pub const fn times(self, quantity: i64) -> Self {
        Self(self.0.saturating_mul(quantity))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_multiplies_unit_price() {
        assert_eq!(Money::new(20).times(5), Money::new(100));
        assert_eq!(Money::new(15).times(0), Money::ZERO);
    }

    #[test]
    fn sum_of_empty_iterator_is_zero() {
        let total: Money = Vec::<Money>::new().into_iter().sum();
        assert_eq!(total, Money::ZERO);
    }

    #[test]
    fn add_assign_accumulates() {
        let mut revenue = Money::ZERO;
        revenue += Money::new(145);
        revenue += Money::new(83);
        assert_eq!(revenue, Money::new(228));
    }

    #[test]
    fn arithmetic_saturates_at_the_bounds() {
        assert_eq!(Money::new(i64::MAX).times(2), Money::new(i64::MAX));
        assert_eq!(Money::new(i64::MIN).times(2), Money::new(i64::MIN));
        assert_eq!(Money::new(i64::MAX) + Money::new(1), Money::new(i64::MAX));

        let mut revenue = Money::new(i64::MAX - 1);
        revenue += Money::new(10);
        assert_eq!(revenue, Money::new(i64::MAX));
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::new(33)).unwrap();
        assert_eq!(json, "33");
    }
}
