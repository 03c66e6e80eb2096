use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income range mapped to an estimated population percentile.
///
/// Both bounds are inclusive, so adjacent bands configured with touching
/// bounds both match the shared boundary; the bell curve model resolves that
/// by taking the first band in configured order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentileBand {
    pub percentile: u8,
    pub lower_bound: Decimal,
    pub upper_bound: Decimal,
    pub median_income: Decimal,
}

impl PercentileBand {
    pub fn new(
        percentile: u8,
        lower_bound: Decimal,
        upper_bound: Decimal,
        median_income: Decimal,
    ) -> Self {
        Self {
            percentile,
            lower_bound,
            upper_bound,
            median_income,
        }
    }

    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income >= self.lower_bound && income <= self.upper_bound
    }
}
