//! Creator reliability: the percentage of a creator's projects that have
//! received at least one completed pledge.
//!
//! Always a full recomputation from ground-truth counts, never an
//! increment, so repeated runs cannot drift.

use rust_decimal::Decimal;

/// Compute a reliability score, rounded to two decimal places.
///
/// `total_projects == 0` yields 0 rather than a division error.
pub fn compute_reliability(total_projects: i64, funded_projects: i64) -> Decimal {
    if total_projects == 0 {
        return Decimal::ZERO;
    }
    let funded = Decimal::from(funded_projects);
    let total = Decimal::from(total_projects);
    (funded * Decimal::ONE_HUNDRED / total).round_dp(2)
}
