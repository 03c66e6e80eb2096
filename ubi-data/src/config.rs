//! Policy configuration read from TOML.
//!
//! Every section is optional; anything left out falls back to the canonical
//! parameters of the taxation models.
//!
//! ```toml
//! ubi_id = 1
//! model_id = 2
//! monthly_ubi = 2000
//! exemption_amount = 24
//!
//! [flat]
//! tax_rate = 30
//!
//! [[brackets]]
//! lower_bound = 0
//! upper_bound = 24
//! rate = 0
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ubi_core::{
    BellCurveParameters, Bracket, PercentileBand, RevenuePolicy, StrategyConfig,
    StrategyConfigError, TaxModelKind, calculations::common::DEFAULT_EXEMPTION_AMOUNT,
    default_brackets, default_percentile_bands,
};

#[derive(Debug, Error)]
pub enum PolicyConfigError {
    #[error("cannot read policy config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("policy config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid policy config: {0}")]
    Invalid(#[from] StrategyConfigError),

    #[error("monthly UBI must be non-negative, got {0}")]
    NegativeUbi(Decimal),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatSection {
    pub tax_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Scenario id stamped on exported model data.
    pub ubi_id: i32,

    pub model_id: i32,

    /// Monthly UBI per person, in base currency units.
    pub monthly_ubi: Decimal,

    /// In thousands.
    pub exemption_amount: Decimal,

    pub flat: Option<FlatSection>,
    pub bell_curve: Option<BellCurveParameters>,
    pub brackets: Vec<Bracket>,
    pub percentile_bands: Vec<PercentileBand>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            ubi_id: 1,
            model_id: TaxModelKind::Flat.id(),
            monthly_ubi: Decimal::ZERO,
            exemption_amount: DEFAULT_EXEMPTION_AMOUNT,
            flat: None,
            bell_curve: None,
            brackets: Vec::new(),
            percentile_bands: Vec::new(),
        }
    }
}

impl PolicyConfig {
    /// Reads and parses a config file without validating it, so that
    /// overrides can be applied before [`Self::validate_for`].
    pub fn read(path: &Path) -> Result<Self, PolicyConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| PolicyConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        contents.parse()
    }

    /// Reads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, PolicyConfigError> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the UBI amount and the parameters of the selected model.
    pub fn validate(&self) -> Result<(), PolicyConfigError> {
        self.validate_ubi()?;
        self.strategy_config().validate()?;
        Ok(())
    }

    /// Checks the UBI amount and the parameters of `kind`, whatever
    /// `model_id` selects.
    pub fn validate_for(
        &self,
        kind: TaxModelKind,
    ) -> Result<(), PolicyConfigError> {
        self.validate_ubi()?;
        self.strategy_config_for(kind).validate()?;
        Ok(())
    }

    fn validate_ubi(&self) -> Result<(), PolicyConfigError> {
        if self.monthly_ubi < Decimal::ZERO {
            return Err(PolicyConfigError::NegativeUbi(self.monthly_ubi));
        }
        Ok(())
    }

    /// Strategy parameters, with the canonical defaults filling any
    /// section the file leaves out.
    pub fn strategy_config(&self) -> StrategyConfig {
        let defaults = StrategyConfig::for_model(self.model_id);

        StrategyConfig {
            model_id: self.model_id,
            flat_tax_rate: self
                .flat
                .as_ref()
                .map_or(defaults.flat_tax_rate, |flat| flat.tax_rate),
            brackets: if self.brackets.is_empty() {
                default_brackets()
            } else {
                self.brackets.clone()
            },
            bell_curve: self.bell_curve.clone().unwrap_or(defaults.bell_curve),
            percentile_bands: if self.percentile_bands.is_empty() {
                default_percentile_bands()
            } else {
                self.percentile_bands.clone()
            },
        }
    }

    /// [`Self::strategy_config`] with `kind` selected.
    pub fn strategy_config_for(
        &self,
        kind: TaxModelKind,
    ) -> StrategyConfig {
        StrategyConfig {
            model_id: kind.id(),
            ..self.strategy_config()
        }
    }

    pub fn revenue_policy(&self) -> RevenuePolicy {
        RevenuePolicy::from_monthly_ubi(self.monthly_ubi, self.exemption_amount)
    }
}

impl FromStr for PolicyConfig {
    type Err = PolicyConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
