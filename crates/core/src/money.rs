//! Currency constants shared by the pledge rules.

use rust_decimal::Decimal;

/// Global minimum pledge: one currency unit.
pub const MIN_PLEDGE_AMOUNT: Decimal = Decimal::ONE;
