//! Bell curve taxation.
//!
//! The effective rate depends on the taxpayer's estimated income percentile
//! and follows a Gaussian curve peaking at [`BellCurveParameters::center`]:
//!
//! ```text
//! rate = max_tax_rate/100 * exp(-(percentile - center)^2 / (2 * width^2))
//! tax  = min(taxable * rate, max_tax_amount)
//! ```
//!
//! The percentile is estimated from the raw income, while the rate applies
//! to the income above the exemption.
//!
//! A non-positive width is treated as an infinitely narrow curve: the full
//! rate applies exactly at the center percentile and nothing elsewhere.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::{DEFAULT_EXEMPTION_AMOUNT, percent, taxable_base, to_base_units};
use crate::models::{
    IncomePercentileRecord, ModelParameters, PercentileBand, TaxModelKind, TaxationModelData,
};

use super::{StrategyConfigError, TaxationStrategy};

const LOWEST_PERCENTILE: u8 = 10;
const HIGHEST_PERCENTILE: u8 = 100;

/// The canonical percentile bands, in thousands.
pub fn default_percentile_bands() -> Vec<PercentileBand> {
    vec![
        PercentileBand::new(10, dec!(0), dec!(15), dec!(10)),
        PercentileBand::new(20, dec!(15), dec!(30), dec!(25)),
        PercentileBand::new(30, dec!(30), dec!(45), dec!(38)),
        PercentileBand::new(40, dec!(45), dec!(60), dec!(52)),
        PercentileBand::new(50, dec!(60), dec!(75), dec!(68)),
        PercentileBand::new(60, dec!(75), dec!(90), dec!(82)),
        PercentileBand::new(70, dec!(90), dec!(120), dec!(105)),
        PercentileBand::new(80, dec!(120), dec!(150), dec!(135)),
        PercentileBand::new(90, dec!(150), dec!(300), dec!(200)),
        PercentileBand::new(100, dec!(300), dec!(1000), dec!(450)),
    ]
}

/// Shape of the bell curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BellCurveParameters {
    /// Percentile (0-100) where the rate peaks.
    pub center: Decimal,

    /// Spread of the curve, in percentile points.
    pub width: Decimal,

    /// Rate at the peak, as a percentage.
    pub max_tax_rate: Decimal,

    /// Hard cap on the tax owed by one taxpayer, in thousands.
    pub max_tax_amount: Decimal,
}

impl BellCurveParameters {
    pub fn validate(&self) -> Result<(), StrategyConfigError> {
        if self.width <= Decimal::ZERO {
            return Err(StrategyConfigError::NonPositiveWidth(self.width));
        }
        if self.max_tax_rate < Decimal::ZERO {
            return Err(StrategyConfigError::NegativeTaxRate(self.max_tax_rate));
        }
        if self.max_tax_amount < Decimal::ZERO {
            return Err(StrategyConfigError::NegativeMaxTaxAmount(
                self.max_tax_amount,
            ));
        }
        Ok(())
    }
}

impl Default for BellCurveParameters {
    fn default() -> Self {
        Self {
            center: dec!(90),
            width: dec!(30),
            max_tax_rate: dec!(40),
            max_tax_amount: dec!(1000),
        }
    }
}

/// Percentile-driven taxation following a bell curve.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use ubi_core::{BellCurveTaxStrategy, TaxationStrategy};
///
/// let strategy = BellCurveTaxStrategy::default();
///
/// // An income of 200 sits in the 90th percentile band, the peak of the
/// // default curve, so the full 40 % applies to the 176 above the exemption.
/// assert_eq!(strategy.estimate_percentile(dec!(200)), 90);
/// assert_eq!(strategy.calculate_tax(dec!(200), dec!(24)), dec!(70.4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BellCurveTaxStrategy {
    parameters: BellCurveParameters,
    bands: Vec<PercentileBand>,
}

impl BellCurveTaxStrategy {
    /// Builds a strategy; the parameters and bands are not validated.
    pub fn new(
        parameters: BellCurveParameters,
        bands: Vec<PercentileBand>,
    ) -> Self {
        if parameters.width <= Decimal::ZERO {
            warn!(
                width = %parameters.width,
                "non-positive bell curve width; only the center percentile is taxed"
            );
        }
        Self { parameters, bands }
    }

    pub fn with_parameters(parameters: BellCurveParameters) -> Self {
        Self::new(parameters, default_percentile_bands())
    }

    pub fn parameters(&self) -> &BellCurveParameters {
        &self.parameters
    }

    pub fn bands(&self) -> &[PercentileBand] {
        &self.bands
    }

    /// Checks that there is at least one band, every percentile is at most 100
    /// and no band has its lower bound above its upper bound.
    pub fn validate_bands(bands: &[PercentileBand]) -> Result<(), StrategyConfigError> {
        if bands.is_empty() {
            return Err(StrategyConfigError::NoPercentileBands);
        }
        for band in bands {
            if band.percentile > HIGHEST_PERCENTILE {
                return Err(StrategyConfigError::PercentileOutOfRange(band.percentile));
            }
            if band.lower_bound > band.upper_bound {
                return Err(StrategyConfigError::InvalidPercentileBand {
                    percentile: band.percentile,
                    lower: band.lower_bound,
                    upper: band.upper_bound,
                });
            }
        }
        Ok(())
    }

    /// Maps an income to the percentile of the first band containing it.
    ///
    /// Incomes above the last band map to 100; anything else that no band
    /// contains maps to the lowest configured percentile.
    pub fn estimate_percentile(
        &self,
        income: Decimal,
    ) -> u8 {
        if let Some(band) = self.bands.iter().find(|band| band.contains(income)) {
            return band.percentile;
        }

        match self.bands.last() {
            Some(last) if income > last.upper_bound => HIGHEST_PERCENTILE,
            _ => self
                .bands
                .iter()
                .map(|band| band.percentile)
                .min()
                .unwrap_or(LOWEST_PERCENTILE),
        }
    }

    /// Height of the curve at `percentile`, between 0 and 1.
    fn curve_factor(
        &self,
        percentile: u8,
    ) -> Decimal {
        let distance = Decimal::from(percentile).saturating_sub(self.parameters.center);
        if distance.is_zero() {
            return Decimal::ONE;
        }
        let width = self.parameters.width;

        let spread = if width > Decimal::ZERO {
            width
                .checked_mul(width)
                .and_then(|squared| squared.checked_mul(Decimal::TWO))
        } else {
            Some(Decimal::ZERO)
        };

        match spread {
            // Too wide to represent: flat at the peak.
            None => Decimal::ONE,
            Some(spread) if spread.is_zero() => Decimal::ZERO,
            Some(spread) => {
                let Some(ratio) = distance
                    .checked_mul(distance)
                    .and_then(|squared| squared.checked_div(spread))
                else {
                    return Decimal::ZERO;
                };

                // exp(-ratio) lies in (0, 1]; values too small for a Decimal
                // underflow to zero.
                (-ratio)
                    .to_f64()
                    .map(f64::exp)
                    .and_then(Decimal::from_f64)
                    .unwrap_or(Decimal::ZERO)
            }
        }
    }

    /// Effective rate (as a multiplier) for an income.
    pub fn effective_rate(
        &self,
        income: Decimal,
    ) -> Decimal {
        let percentile = self.estimate_percentile(income);
        percent(self.parameters.max_tax_rate).saturating_mul(self.curve_factor(percentile))
    }
}

impl Default for BellCurveTaxStrategy {
    fn default() -> Self {
        Self::new(BellCurveParameters::default(), default_percentile_bands())
    }
}

impl TaxationStrategy for BellCurveTaxStrategy {
    fn kind(&self) -> TaxModelKind {
        TaxModelKind::BellCurve
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

        let tax = taxable_income.saturating_mul(self.effective_rate(income));
        tax.min(self.parameters.max_tax_amount)
    }

    fn model_data(
        &self,
        ubi_id: i32,
    ) -> TaxationModelData {
        let mut parameters = ModelParameters::with_exemption(to_base_units(DEFAULT_EXEMPTION_AMOUNT));
        parameters.bell_curve_center = Some(self.parameters.center);
        parameters.bell_curve_width = Some(self.parameters.width);
        parameters.max_tax_rate = Some(self.parameters.max_tax_rate);
        parameters.max_tax_amount = Some(to_base_units(self.parameters.max_tax_amount));

        let percentiles = self
            .bands
            .iter()
            .zip(1..)
            .map(|(band, percentile_id)| IncomePercentileRecord {
                percentile_id,
                ubiid: ubi_id,
                percentile: band.percentile,
                lower_bound: to_base_units(band.lower_bound),
                upper_bound: to_base_units(band.upper_bound),
                median_income: to_base_units(band.median_income),
            })
            .collect();

        TaxationModelData {
            model: self.kind().as_model(),
            parameters,
            brackets: Vec::new(),
            percentiles,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const EXEMPTION: Decimal = dec!(24);

    fn uncapped(parameters: BellCurveParameters) -> BellCurveTaxStrategy {
        BellCurveTaxStrategy::with_parameters(BellCurveParameters {
            max_tax_amount: dec!(1000000),
            ..parameters
        })
    }

    // =========================================================================
    // estimate_percentile tests
    // =========================================================================

    #[test]
    fn estimate_percentile_finds_containing_band() {
        let strategy = BellCurveTaxStrategy::default();

        assert_eq!(strategy.estimate_percentile(dec!(5)), 10);
        assert_eq!(strategy.estimate_percentile(dec!(52)), 40);
        assert_eq!(strategy.estimate_percentile(dec!(200)), 90);
        assert_eq!(strategy.estimate_percentile(dec!(999)), 100);
    }

    #[test]
    fn estimate_percentile_first_band_wins_on_shared_boundary() {
        let strategy = BellCurveTaxStrategy::default();

        // 15 closes the 10th band and opens the 20th
        assert_eq!(strategy.estimate_percentile(dec!(15)), 10);
        assert_eq!(strategy.estimate_percentile(dec!(150)), 80);
    }

    #[test]
    fn estimate_percentile_above_last_band_is_100() {
        let strategy = BellCurveTaxStrategy::default();

        assert_eq!(strategy.estimate_percentile(dec!(1000.01)), 100);
        assert_eq!(strategy.estimate_percentile(dec!(50000)), 100);
    }

    #[test]
    fn estimate_percentile_below_all_bands_is_lowest() {
        let strategy = BellCurveTaxStrategy::default();

        assert_eq!(strategy.estimate_percentile(dec!(-10)), 10);
    }

    #[test]
    fn estimate_percentile_without_bands_defaults_to_lowest() {
        let strategy = BellCurveTaxStrategy::new(BellCurveParameters::default(), Vec::new());

        assert_eq!(strategy.estimate_percentile(dec!(75)), 10);
    }

    #[test]
    fn estimate_percentile_in_gap_uses_lowest_configured() {
        let strategy = BellCurveTaxStrategy::new(
            BellCurveParameters::default(),
            vec![
                PercentileBand::new(30, dec!(0), dec!(10), dec!(5)),
                PercentileBand::new(80, dec!(20), dec!(40), dec!(30)),
            ],
        );

        assert_eq!(strategy.estimate_percentile(dec!(15)), 30);
        assert_eq!(strategy.estimate_percentile(dec!(41)), 100);
    }

    // =========================================================================
    // calculate_tax tests
    // =========================================================================

    #[test]
    fn calculate_tax_is_zero_at_or_below_exemption() {
        let strategy = BellCurveTaxStrategy::default();

        assert_eq!(strategy.calculate_tax(dec!(24), EXEMPTION), Decimal::ZERO);
        assert_eq!(strategy.calculate_tax(dec!(3), EXEMPTION), Decimal::ZERO);
        assert_eq!(strategy.calculate_tax(dec!(-40), EXEMPTION), Decimal::ZERO);
    }

    #[test]
    fn calculate_tax_at_peak_applies_full_rate() {
        let strategy = uncapped(BellCurveParameters::default());

        let result = strategy.calculate_tax(dec!(200), EXEMPTION);

        // (200 - 24) * 0.40
        assert_eq!(result, dec!(70.4));
    }

    #[test]
    fn calculate_tax_is_capped_at_max_tax_amount() {
        let strategy = BellCurveTaxStrategy::with_parameters(BellCurveParameters {
            max_tax_amount: dec!(1000),
            ..BellCurveParameters::default()
        });

        let result = strategy.calculate_tax(dec!(10000), EXEMPTION);

        assert_eq!(result, dec!(1000));
    }

    #[test]
    fn calculate_tax_below_cap_is_not_capped() {
        let strategy = BellCurveTaxStrategy::default();

        let result = strategy.calculate_tax(dec!(200), EXEMPTION);

        assert_eq!(result, dec!(70.4));
    }

    #[test]
    fn calculate_tax_uses_raw_income_for_percentile() {
        let strategy = uncapped(BellCurveParameters::default());

        // Taxable income is 1, but the raw income of 175 sits in the 90th band
        let result = strategy.calculate_tax(dec!(175), dec!(174));

        assert_eq!(result, dec!(0.4));
    }

    #[test]
    fn effective_rate_peaks_at_center_and_falls_away() {
        let strategy = uncapped(BellCurveParameters::default());
        let band_incomes: Vec<Decimal> = default_percentile_bands()
            .iter()
            .map(|band| band.median_income)
            .collect();
        let rates: Vec<Decimal> = band_incomes
            .iter()
            .map(|income| strategy.effective_rate(*income))
            .collect();

        // Bands 10..=90 climb towards the 90th percentile peak
        for pair in rates[..9].windows(2) {
            assert!(pair[0] < pair[1], "rate should rise towards the center");
        }
        // 100th band falls away again
        assert!(rates[9] < rates[8]);
        assert_eq!(rates[8], dec!(0.40));
    }

    #[test]
    fn effective_rate_is_symmetric_around_center() {
        let strategy = uncapped(BellCurveParameters {
            center: dec!(50),
            ..BellCurveParameters::default()
        });

        let below = strategy.effective_rate(dec!(38)); // 30th
        let above = strategy.effective_rate(dec!(105)); // 70th

        assert_eq!(below, above);
        assert!(below < strategy.effective_rate(dec!(68)));
    }

    #[test]
    fn zero_width_taxes_only_the_center_percentile() {
        let strategy = uncapped(BellCurveParameters {
            width: Decimal::ZERO,
            ..BellCurveParameters::default()
        });

        assert_eq!(strategy.calculate_tax(dec!(200), EXEMPTION), dec!(70.4));
        assert_eq!(strategy.calculate_tax(dec!(135), EXEMPTION), Decimal::ZERO);
        assert_eq!(strategy.calculate_tax(dec!(450), EXEMPTION), Decimal::ZERO);
    }

    #[test]
    fn tiny_width_underflows_to_zero_away_from_center() {
        let strategy = uncapped(BellCurveParameters {
            width: dec!(0.0000000000001),
            ..BellCurveParameters::default()
        });

        assert_eq!(strategy.calculate_tax(dec!(135), EXEMPTION), Decimal::ZERO);
        assert_eq!(strategy.calculate_tax(dec!(200), EXEMPTION), dec!(70.4));
    }

    #[test]
    fn zero_max_rate_is_never_taxed() {
        let strategy = BellCurveTaxStrategy::with_parameters(BellCurveParameters {
            max_tax_rate: Decimal::ZERO,
            ..BellCurveParameters::default()
        });

        assert_eq!(strategy.calculate_tax(dec!(200), EXEMPTION), Decimal::ZERO);
    }

    #[test]
    fn calculate_tax_with_huge_rate_and_income_is_capped() {
        let strategy = BellCurveTaxStrategy::with_parameters(BellCurveParameters {
            max_tax_rate: dec!(1000000),
            max_tax_amount: Decimal::MAX,
            ..BellCurveParameters::default()
        });

        let result = strategy.calculate_tax(Decimal::MAX, Decimal::ZERO);

        assert_eq!(result, Decimal::MAX);
    }

    #[test]
    fn extreme_center_leaves_no_rate() {
        let strategy = uncapped(BellCurveParameters {
            center: Decimal::MIN,
            ..BellCurveParameters::default()
        });

        assert_eq!(strategy.effective_rate(dec!(200)), Decimal::ZERO);
        assert_eq!(strategy.calculate_tax(dec!(200), EXEMPTION), Decimal::ZERO);
    }

    // =========================================================================
    // validation tests
    // =========================================================================

    #[test]
    fn validate_accepts_defaults() {
        assert_eq!(BellCurveParameters::default().validate(), Ok(()));
        assert_eq!(
            BellCurveTaxStrategy::validate_bands(&default_percentile_bands()),
            Ok(())
        );
    }

    #[test]
    fn validate_rejects_zero_width() {
        let parameters = BellCurveParameters {
            width: Decimal::ZERO,
            ..BellCurveParameters::default()
        };

        assert_eq!(
            parameters.validate(),
            Err(StrategyConfigError::NonPositiveWidth(Decimal::ZERO))
        );
    }

    #[test]
    fn validate_rejects_negative_cap() {
        let parameters = BellCurveParameters {
            max_tax_amount: dec!(-1),
            ..BellCurveParameters::default()
        };

        assert_eq!(
            parameters.validate(),
            Err(StrategyConfigError::NegativeMaxTaxAmount(dec!(-1)))
        );
    }

    #[test]
    fn validate_bands_rejects_inverted_band() {
        let bands = vec![PercentileBand::new(10, dec!(20), dec!(10), dec!(15))];

        assert_eq!(
            BellCurveTaxStrategy::validate_bands(&bands),
            Err(StrategyConfigError::InvalidPercentileBand {
                percentile: 10,
                lower: dec!(20),
                upper: dec!(10),
            })
        );
    }

    #[test]
    fn validate_bands_rejects_empty_and_out_of_range() {
        assert_eq!(
            BellCurveTaxStrategy::validate_bands(&[]),
            Err(StrategyConfigError::NoPercentileBands)
        );
        assert_eq!(
            BellCurveTaxStrategy::validate_bands(&[PercentileBand::new(
                120,
                dec!(0),
                dec!(10),
                dec!(5)
            )]),
            Err(StrategyConfigError::PercentileOutOfRange(120))
        );
    }

    // =========================================================================
    // model_data tests
    // =========================================================================

    #[test]
    fn model_data_carries_curve_and_bands() {
        let strategy = BellCurveTaxStrategy::default();

        let data = strategy.model_data(5);

        assert_eq!(data.model.model_id, 3);
        assert_eq!(data.parameters.exemption_amount, dec!(24000));
        assert_eq!(data.parameters.bell_curve_center, Some(dec!(90)));
        assert_eq!(data.parameters.bell_curve_width, Some(dec!(30)));
        assert_eq!(data.parameters.max_tax_rate, Some(dec!(40)));
        assert_eq!(data.parameters.max_tax_amount, Some(dec!(1000000)));
        assert_eq!(data.parameters.tax_rate, None);
        assert!(data.brackets.is_empty());
        assert_eq!(data.percentiles.len(), 10);
        assert_eq!(
            data.percentiles[8],
            IncomePercentileRecord {
                percentile_id: 9,
                ubiid: 5,
                percentile: 90,
                lower_bound: dec!(150000),
                upper_bound: dec!(300000),
                median_income: dec!(200000),
            }
        );
    }
}
