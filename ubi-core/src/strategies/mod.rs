//! Interchangeable taxation models.
//!
//! Each model implements [`TaxationStrategy`]; [`TaxationStrategyFactory`]
//! turns a stored model id (or a [`StrategyConfig`]) into a boxed strategy.
//! Strategies are immutable once built and are never serialized; use
//! [`TaxationStrategy::model_data`] to obtain a plain record instead.

pub mod bell_curve;
pub mod config;
pub mod factory;
pub mod flat;
pub mod progressive;
pub mod strategy;

pub use bell_curve::{BellCurveParameters, BellCurveTaxStrategy, default_percentile_bands};
pub use config::{StrategyConfig, StrategyConfigError};
pub use factory::TaxationStrategyFactory;
pub use flat::FlatTaxStrategy;
pub use progressive::{ProgressiveTaxStrategy, default_brackets};
pub use strategy::TaxationStrategy;
