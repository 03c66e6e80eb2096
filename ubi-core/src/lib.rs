//! Taxation models and revenue calculations for universal basic income
//! scenarios.
//!
//! Amounts are expressed in thousands of currency units unless a type says
//! otherwise.

pub mod calculations;
pub mod models;
pub mod strategies;

pub use calculations::{
    Feasibility, UbiCostSummary, calculate_tax_revenue_without_ubi, total_population,
};
pub use models::*;
pub use strategies::*;
