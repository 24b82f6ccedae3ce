//! Shared arithmetic for the worksheets: financial rounding, the
//! non-negative clamp, and the cess levy.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding (values at exactly 0.005 round away from zero).
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Floors a value at zero. Used wherever a worksheet line reads
/// "if zero or less, enter 0".
pub fn clamp_non_negative(value: Decimal) -> Decimal {
    if value > Decimal::ZERO {
        value
    } else {
        Decimal::ZERO
    }
}

/// Health-and-education cess: a flat percentage levied on top of the
/// computed base tax.
pub fn cess_on(
    base_tax: Decimal,
    rate_percent: Decimal,
) -> Decimal {
    round_half_up(base_tax * rate_percent / Decimal::ONE_HUNDRED)
}
