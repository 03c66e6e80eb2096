use std::fmt::Debug;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{IncomeSegment, RevenuePolicy, TaxModelKind, TaxationModelData};

/// Common contract of every taxation model.
///
/// Implementations are pure: the result of every method depends only on its
/// arguments and the parameters the strategy was built with.
pub trait TaxationStrategy: Debug + Send + Sync {
    /// Which model this strategy implements.
    fn kind(&self) -> TaxModelKind;

    /// Tax owed on `income` when everything up to `exemption_amount` is exempt.
    ///
    /// Returns exactly zero whenever `income <= exemption_amount`, including
    /// for negative income.
    fn calculate_tax(
        &self,
        income: Decimal,
        exemption_amount: Decimal,
    ) -> Decimal;

    /// Serializable description of the model and its parameters for the UBI
    /// scenario `ubi_id`.
    fn model_data(
        &self,
        ubi_id: i32,
    ) -> TaxationModelData;

    fn model_id(&self) -> i32 {
        self.kind().id()
    }

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn description(&self) -> &'static str {
        self.kind().description()
    }

    /// Total tax collected across `segments` once every person receives the
    /// policy's annualized UBI on top of the segment's average income.
    ///
    /// Segments are summed in order.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use ubi_core::{FlatTaxStrategy, IncomeSegment, RevenuePolicy, TaxationStrategy};
    ///
    /// let strategy = FlatTaxStrategy::new(dec!(30));
    /// let segments = [
    ///     IncomeSegment::new(dec!(20), dec!(100)),
    ///     IncomeSegment::new(dec!(200), dec!(10)),
    /// ];
    /// let policy = RevenuePolicy::new(dec!(24), dec!(24));
    ///
    /// assert_eq!(strategy.calculate_tax_revenue(&segments, &policy), dec!(1200));
    /// ```
    fn calculate_tax_revenue(
        &self,
        segments: &[IncomeSegment],
        policy: &RevenuePolicy,
    ) -> Decimal {
        segments.iter().fold(Decimal::ZERO, |total, segment| {
            let income_with_ubi = segment.average_income.saturating_add(policy.annualized_ubi);
            let tax = self.calculate_tax(income_with_ubi, policy.exemption_amount);
            let revenue = tax.saturating_mul(segment.population_weight);

            debug!(
                model = self.name(),
                income = %income_with_ubi,
                tax = %tax,
                revenue = %revenue,
                "segment revenue"
            );

            total.saturating_add(revenue)
        })
    }
}
