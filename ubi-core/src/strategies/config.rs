use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Bracket, PercentileBand, TaxModelError, TaxModelKind};

use super::{
    BellCurveParameters, BellCurveTaxStrategy, FlatTaxStrategy, ProgressiveTaxStrategy,
    default_brackets, default_percentile_bands,
};

/// Errors reported by the optional parameter validators.
///
/// The calculation path never validates; these are for callers that accept
/// parameters from users or files.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrategyConfigError {
    #[error(transparent)]
    UnknownModel(#[from] TaxModelError),

    #[error("tax rate must be non-negative, got {0}")]
    NegativeTaxRate(Decimal),

    #[error("progressive model needs at least one bracket")]
    NoBrackets,

    #[error("bracket upper bound {upper} must be above its lower bound {lower}")]
    InvalidBracketRange { lower: Decimal, upper: Decimal },

    #[error("only the top bracket may be unbounded, found one starting at {0}")]
    UnboundedBracketNotLast(Decimal),

    #[error("the top bracket must be unbounded")]
    MissingUnboundedBracket,

    #[error("brackets must be contiguous: one ends at {upper} but the next starts at {next_lower}")]
    BracketGap { upper: Decimal, next_lower: Decimal },

    #[error("bell curve model needs at least one percentile band")]
    NoPercentileBands,

    #[error("percentile must be between 0 and 100, got {0}")]
    PercentileOutOfRange(u8),

    #[error("percentile band {percentile} has lower bound {lower} above upper bound {upper}")]
    InvalidPercentileBand {
        percentile: u8,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("bell curve width must be positive, got {0}")]
    NonPositiveWidth(Decimal),

    #[error("maximum tax amount must be non-negative, got {0}")]
    NegativeMaxTaxAmount(Decimal),
}

/// Parameters for every model, plus the id of the one to use.
///
/// Only the parameters of the selected model matter when a strategy is
/// built; the rest keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub model_id: i32,
    pub flat_tax_rate: Decimal,
    pub brackets: Vec<Bracket>,
    pub bell_curve: BellCurveParameters,
    pub percentile_bands: Vec<PercentileBand>,
}

impl StrategyConfig {
    pub fn for_model(model_id: i32) -> Self {
        Self {
            model_id,
            ..Self::default()
        }
    }

    /// Validates the selected model id and that model's parameters.
    pub fn validate(&self) -> Result<(), StrategyConfigError> {
        match TaxModelKind::try_from(self.model_id)? {
            TaxModelKind::Flat => {
                if self.flat_tax_rate < Decimal::ZERO {
                    return Err(StrategyConfigError::NegativeTaxRate(self.flat_tax_rate));
                }
                Ok(())
            }
            TaxModelKind::Progressive => ProgressiveTaxStrategy::validate_brackets(&self.brackets),
            TaxModelKind::BellCurve => {
                self.bell_curve.validate()?;
                BellCurveTaxStrategy::validate_bands(&self.percentile_bands)
            }
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            model_id: TaxModelKind::Flat.id(),
            flat_tax_rate: FlatTaxStrategy::DEFAULT_TAX_RATE,
            brackets: default_brackets(),
            bell_curve: BellCurveParameters::default(),
            percentile_bands: default_percentile_bands(),
        }
    }
}
