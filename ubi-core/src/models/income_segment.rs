use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{DEFAULT_EXEMPTION_AMOUNT, THOUSAND};

/// One slice of the population (a quintile, a decile, ...) used for revenue
/// aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSegment {
    /// Average taxable income of the segment, in thousands.
    pub average_income: Decimal,

    /// Number of people in the segment.
    pub population_weight: Decimal,

    /// Tax currently paid per person in the segment (e.g. the median tax), in
    /// thousands. Only used for revenue comparisons without UBI.
    #[serde(default)]
    pub baseline_tax: Option<Decimal>,
}

impl IncomeSegment {
    pub fn new(
        average_income: Decimal,
        population_weight: Decimal,
    ) -> Self {
        Self {
            average_income,
            population_weight,
            baseline_tax: None,
        }
    }

    pub fn with_baseline_tax(
        mut self,
        baseline_tax: Decimal,
    ) -> Self {
        self.baseline_tax = Some(baseline_tax);
        self
    }
}

/// Policy inputs for revenue aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePolicy {
    /// Yearly UBI paid per person, in thousands.
    pub annualized_ubi: Decimal,

    /// Income threshold below which no tax is owed, in thousands.
    pub exemption_amount: Decimal,
}

impl RevenuePolicy {
    pub fn new(
        annualized_ubi: Decimal,
        exemption_amount: Decimal,
    ) -> Self {
        Self {
            annualized_ubi,
            exemption_amount,
        }
    }

    /// Builds a policy from a monthly UBI expressed in base currency units.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use ubi_core::RevenuePolicy;
    ///
    /// let policy = RevenuePolicy::from_monthly_ubi(dec!(2000), dec!(24));
    ///
    /// assert_eq!(policy.annualized_ubi, dec!(24));
    /// ```
    pub fn from_monthly_ubi(
        monthly_ubi: Decimal,
        exemption_amount: Decimal,
    ) -> Self {
        Self::new(monthly_ubi.saturating_mul(dec!(12)) / THOUSAND, exemption_amount)
    }
}

impl Default for RevenuePolicy {
    fn default() -> Self {
        Self::new(Decimal::ZERO, DEFAULT_EXEMPTION_AMOUNT)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_monthly_ubi_annualizes_into_thousands() {
        let policy = RevenuePolicy::from_monthly_ubi(dec!(1500), dec!(24));

        assert_eq!(policy.annualized_ubi, dec!(18));
        assert_eq!(policy.exemption_amount, dec!(24));
    }

    #[test]
    fn from_monthly_ubi_saturates_huge_amounts() {
        let policy = RevenuePolicy::from_monthly_ubi(Decimal::MAX, dec!(24));

        assert_eq!(policy.annualized_ubi, Decimal::MAX / THOUSAND);
    }

    #[test]
    fn default_policy_has_no_ubi_and_canonical_exemption() {
        let policy = RevenuePolicy::default();

        assert_eq!(policy.annualized_ubi, Decimal::ZERO);
        assert_eq!(policy.exemption_amount, dec!(24));
    }

    #[test]
    fn with_baseline_tax_sets_baseline() {
        let segment = IncomeSegment::new(dec!(45), dec!(1000)).with_baseline_tax(dec!(4.2));

        assert_eq!(segment.baseline_tax, Some(dec!(4.2)));
    }
}
