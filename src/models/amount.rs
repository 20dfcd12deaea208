//! Overflow-safe arithmetic on caller-supplied amounts.
//!
//! `Decimal` operators panic once a result leaves the representable range.
//! Calculators go through [`SaturatingAmount`] instead, which clamps to
//! `Decimal::MAX` or `Decimal::MIN` and logs the overflow.

use rust_decimal::Decimal;
use tracing::warn;

/// Decimal arithmetic that saturates instead of panicking.
pub(crate) trait SaturatingAmount: Sized {
    fn sat_add(self, rhs: Self) -> Self;
    fn sat_sub(self, rhs: Self) -> Self;
    fn sat_mul(self, rhs: Self) -> Self;
    /// Divides, yielding zero for a zero divisor.
    fn sat_div(self, rhs: Self) -> Self;
}

fn saturate(negative: bool, operation: &'static str, lhs: Decimal, rhs: Decimal) -> Decimal {
    warn!(operation, lhs = %lhs, rhs = %rhs, "Amount out of range, saturating");
    if negative { Decimal::MIN } else { Decimal::MAX }
}

impl SaturatingAmount for Decimal {
    fn sat_add(self, rhs: Decimal) -> Decimal {
        self.checked_add(rhs)
            .unwrap_or_else(|| saturate(self.is_sign_negative(), "add", self, rhs))
    }

    fn sat_sub(self, rhs: Decimal) -> Decimal {
        self.checked_sub(rhs)
            .unwrap_or_else(|| saturate(self.is_sign_negative(), "sub", self, rhs))
    }

    fn sat_mul(self, rhs: Decimal) -> Decimal {
        let negative = self.is_sign_negative() != rhs.is_sign_negative();
        self.checked_mul(rhs)
            .unwrap_or_else(|| saturate(negative, "mul", self, rhs))
    }

    fn sat_div(self, rhs: Decimal) -> Decimal {
        if rhs.is_zero() {
            return Decimal::ZERO;
        }
        let negative = self.is_sign_negative() != rhs.is_sign_negative();
        self.checked_div(rhs)
            .unwrap_or_else(|| saturate(negative, "div", self, rhs))
    }
}
