use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TaxationModel;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxModelError {
    #[error("unknown taxation model id {0}")]
    UnknownModel(i32),
}

/// The taxation models the engine knows about.
///
/// The numeric ids are stored next to historical records and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxModelKind {
    Flat,
    Progressive,
    BellCurve,
}

impl TaxModelKind {
    pub fn all() -> [Self; 3] {
        [Self::Flat, Self::Progressive, Self::BellCurve]
    }

    pub fn id(&self) -> i32 {
        match self {
            Self::Flat => 1,
            Self::Progressive => 2,
            Self::BellCurve => 3,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::Flat),
            2 => Some(Self::Progressive),
            3 => Some(Self::BellCurve),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Flat => "Flat Tax",
            Self::Progressive => "Progressive Tax",
            Self::BellCurve => "Bell Curve",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Flat => "Simple flat tax rate applied to all income above exemption",
            Self::Progressive => "Multiple tax brackets with increasing rates for higher incomes",
            Self::BellCurve => {
                "Tax rate based on income percentile, following a bell curve distribution"
            }
        }
    }

    /// Identity record used in serialized model data and model listings.
    pub fn as_model(&self) -> TaxationModel {
        TaxationModel {
            model_id: self.id(),
            model_name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }
}

impl TryFrom<i32> for TaxModelKind {
    type Error = TaxModelError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(TaxModelError::UnknownModel(id))
    }
}
