//! Flat tax: one rate for all income above the exemption.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::{DEFAULT_EXEMPTION_AMOUNT, percent, taxable_base, to_base_units};
use crate::models::{ModelParameters, TaxModelKind, TaxationModelData};

use super::TaxationStrategy;

/// Applies a uniform rate to all income above the exemption.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use ubi_core::{FlatTaxStrategy, TaxationStrategy};
///
/// let strategy = FlatTaxStrategy::new(dec!(30));
///
/// assert_eq!(strategy.calculate_tax(dec!(124), dec!(24)), dec!(30));
/// assert_eq!(strategy.calculate_tax(dec!(20), dec!(24)), dec!(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTaxStrategy {
    tax_rate: Decimal,
}

impl FlatTaxStrategy {
    pub const DEFAULT_TAX_RATE: Decimal = dec!(30);

    /// `tax_rate` is a percentage and is not clamped.
    pub fn new(tax_rate: Decimal) -> Self {
        Self { tax_rate }
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }
}

impl Default for FlatTaxStrategy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TAX_RATE)
    }
}

impl TaxationStrategy for FlatTaxStrategy {
    fn kind(&self) -> TaxModelKind {
        TaxModelKind::Flat
    }

    fn calculate_tax(
        &self,
        income: Decimal,
        exemption_amount: Decimal,
    ) -> Decimal {
        taxable_base(income, exemption_amount).saturating_mul(percent(self.tax_rate))
    }

    fn model_data(
        &self,
        _ubi_id: i32,
    ) -> TaxationModelData {
        let mut parameters = ModelParameters::with_exemption(to_base_units(DEFAULT_EXEMPTION_AMOUNT));
        parameters.tax_rate = Some(self.tax_rate);

        TaxationModelData {
            model: self.kind().as_model(),
            parameters,
            brackets: Vec::new(),
            percentiles: Vec::new(),
        }
    }
}
