//! Common helpers shared by the taxation strategies and revenue calculations.
//!
//! Amounts inside the engine are usually expressed in thousands of currency
//! units; the helpers here convert between that scale and base units and turn
//! percentage rates into multipliers.
//!
//! Arithmetic on caller-supplied amounts saturates at [`Decimal::MAX`] and
//! [`Decimal::MIN`] instead of panicking on overflow.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Number of base currency units in one engine unit (amounts are in thousands).
pub const THOUSAND: Decimal = dec!(1000);

/// Exemption applied by the canonical policy, in thousands (24 000 base units).
pub const DEFAULT_EXEMPTION_AMOUNT: Decimal = dec!(24);

const HUNDRED: Decimal = dec!(100);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ubi_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use ubi_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Income above the exemption, never negative.
///
/// ```
/// use rust_decimal_macros::dec;
/// use ubi_core::calculations::common::taxable_base;
///
/// assert_eq!(taxable_base(dec!(124), dec!(24)), dec!(100));
/// assert_eq!(taxable_base(dec!(10), dec!(24)), dec!(0));
/// ```
pub fn taxable_base(
    income: Decimal,
    exemption_amount: Decimal,
) -> Decimal {
    max(income.saturating_sub(exemption_amount), Decimal::ZERO)
}

/// Converts a percentage (`30` for 30 %) into a multiplier (`0.30`).
pub fn percent(rate: Decimal) -> Decimal {
    rate / HUNDRED
}

/// Converts an amount in thousands into base currency units.
pub fn to_base_units(thousands: Decimal) -> Decimal {
    thousands.saturating_mul(THOUSAND)
}

/// The saturated result of an overflowing operation with the given sign.
pub fn saturated(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}
