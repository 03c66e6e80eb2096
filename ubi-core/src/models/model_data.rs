//! Plain data records describing a taxation model and its parameters.
//!
//! These are the only taxation values that cross a serialization boundary;
//! strategy instances themselves stay in-process. Amounts are expressed in
//! base currency units (the engine's thousand-unit values multiplied by
//! 1000) and serialized as JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity of a taxation model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxationModel {
    pub model_id: i32,
    pub model_name: String,
    pub description: String,
}

/// Model parameters. Fields that do not apply to a model are `None` and
/// left out of the serialized record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelParameters {
    #[serde(with = "rust_decimal::serde::float")]
    pub exemption_amount: Decimal,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub tax_rate: Option<Decimal>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub bell_curve_center: Option<Decimal>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub bell_curve_width: Option<Decimal>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub max_tax_rate: Option<Decimal>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub max_tax_amount: Option<Decimal>,
}

impl ModelParameters {
    /// Parameters carrying only the exemption amount.
    pub fn with_exemption(exemption_amount: Decimal) -> Self {
        Self {
            exemption_amount,
            tax_rate: None,
            bell_curve_center: None,
            bell_curve_width: None,
            max_tax_rate: None,
            max_tax_amount: None,
        }
    }
}

/// A progressive bracket as stored alongside a UBI scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracketRecord {
    pub bracket_id: i32,
    pub model_id: i32,
    pub ubiid: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub lower_bound: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub upper_bound: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
}

/// A percentile band as stored alongside a UBI scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomePercentileRecord {
    pub percentile_id: i32,
    pub ubiid: i32,
    pub percentile: u8,
    #[serde(with = "rust_decimal::serde::float")]
    pub lower_bound: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub upper_bound: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub median_income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxationModelData {
    pub model: TaxationModel,
    pub parameters: ModelParameters,
    pub brackets: Vec<TaxBracketRecord>,
    pub percentiles: Vec<IncomePercentileRecord>,
}
