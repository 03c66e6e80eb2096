//! Progressive (marginal bracket) taxation.
//!
//! The exemption acts as a floor shift: brackets lying entirely below the
//! exemption are skipped and a bracket straddling it only taxes the part
//! above it. An explicit 0 % bottom bracket may coexist with the exemption;
//! bounds are never re-based to zero.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use ubi_core::{ProgressiveTaxStrategy, TaxationStrategy};
//!
//! let strategy = ProgressiveTaxStrategy::default();
//!
//! // 26 at 10 %
//! assert_eq!(strategy.calculate_tax(dec!(50), dec!(24)), dec!(2.6));
//! // 26 at 10 % + 50 at 20 %
//! assert_eq!(strategy.calculate_tax(dec!(100), dec!(24)), dec!(12.6));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::{
    DEFAULT_EXEMPTION_AMOUNT, max, percent, taxable_base, to_base_units,
};
use crate::models::{Bracket, ModelParameters, TaxBracketRecord, TaxModelKind, TaxationModelData};

use super::{StrategyConfigError, TaxationStrategy};

/// The canonical bracket schedule, in thousands.
pub fn default_brackets() -> Vec<Bracket> {
    vec![
        Bracket::new(dec!(0), Some(dec!(24)), dec!(0)),
        Bracket::new(dec!(24), Some(dec!(50)), dec!(10)),
        Bracket::new(dec!(50), Some(dec!(100)), dec!(20)),
        Bracket::new(dec!(100), Some(dec!(250)), dec!(30)),
        Bracket::new(dec!(250), Some(dec!(500)), dec!(35)),
        Bracket::new(dec!(500), None, dec!(40)),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressiveTaxStrategy {
    brackets: Vec<Bracket>,
}

impl ProgressiveTaxStrategy {
    /// Builds a strategy over `brackets`, kept in the order given.
    ///
    /// The brackets are not validated; see [`Self::validate_brackets`].
    pub fn new(brackets: Vec<Bracket>) -> Self {
        Self { brackets }
    }

    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// Checks that `brackets` form a contiguous schedule ending in a single
    /// unbounded bracket, with non-negative rates.
    ///
    /// Rates are not required to increase.
    pub fn validate_brackets(brackets: &[Bracket]) -> Result<(), StrategyConfigError> {
        if brackets.is_empty() {
            return Err(StrategyConfigError::NoBrackets);
        }

        let mut sorted: Vec<&Bracket> = brackets.iter().collect();
        sorted.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));

        let last = sorted.len() - 1;
        for (index, bracket) in sorted.iter().enumerate() {
            if bracket.rate < Decimal::ZERO {
                return Err(StrategyConfigError::NegativeTaxRate(bracket.rate));
            }

            match bracket.upper_bound {
                Some(upper) if upper <= bracket.lower_bound => {
                    return Err(StrategyConfigError::InvalidBracketRange {
                        lower: bracket.lower_bound,
                        upper,
                    });
                }
                Some(_) if index == last => {
                    return Err(StrategyConfigError::MissingUnboundedBracket);
                }
                None if index != last => {
                    return Err(StrategyConfigError::UnboundedBracketNotLast(
                        bracket.lower_bound,
                    ));
                }
                _ => {}
            }

            if let (Some(upper), Some(next)) = (bracket.upper_bound, sorted.get(index + 1)) {
                if upper != next.lower_bound {
                    return Err(StrategyConfigError::BracketGap {
                        upper,
                        next_lower: next.lower_bound,
                    });
                }
            }
        }

        Ok(())
    }

    /// Brackets in ascending `lower_bound` order. The sort is stable, so
    /// brackets sharing a lower bound keep their configured order.
    fn sorted_brackets(&self) -> Vec<&Bracket> {
        let mut sorted: Vec<&Bracket> = self.brackets.iter().collect();
        sorted.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));
        sorted
    }
}

impl Default for ProgressiveTaxStrategy {
    fn default() -> Self {
        Self::new(default_brackets())
    }
}

impl TaxationStrategy for ProgressiveTaxStrategy {
    fn kind(&self) -> TaxModelKind {
        TaxModelKind::Progressive
    }

    fn calculate_tax(
        &self,
        income: Decimal,
        exemption_amount: Decimal,
    ) -> Decimal {
        let taxable_income = taxable_base(income, exemption_amount);
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let mut remaining = taxable_income;
        let mut tax = Decimal::ZERO;

        for bracket in self.sorted_brackets() {
            let below_exemption = bracket
                .upper_bound
                .is_some_and(|upper| upper <= exemption_amount);
            if below_exemption || remaining <= Decimal::ZERO {
                continue;
            }

            let adjusted_lower = max(bracket.lower_bound, exemption_amount);
            let income_in_bracket = match bracket.upper_bound {
                Some(upper) => remaining.min(upper.saturating_sub(adjusted_lower)),
                None => remaining,
            };
            if income_in_bracket <= Decimal::ZERO {
                continue;
            }

            tax = tax.saturating_add(income_in_bracket.saturating_mul(percent(bracket.rate)));
            remaining -= income_in_bracket;

            if remaining <= Decimal::ZERO {
                break;
            }
        }

        tax
    }

    fn model_data(
        &self,
        ubi_id: i32,
    ) -> TaxationModelData {
        let model_id = self.model_id();
        let brackets = self
            .brackets
            .iter()
            .zip(1..)
            .map(|(bracket, bracket_id)| TaxBracketRecord {
                bracket_id,
                model_id,
                ubiid: ubi_id,
                lower_bound: to_base_units(bracket.lower_bound),
                upper_bound: bracket.upper_bound.map(to_base_units),
                tax_rate: bracket.rate,
            })
            .collect();

        TaxationModelData {
            model: self.kind().as_model(),
            parameters: ModelParameters::with_exemption(to_base_units(DEFAULT_EXEMPTION_AMOUNT)),
            brackets,
            percentiles: Vec::new(),
        }
    }
}
