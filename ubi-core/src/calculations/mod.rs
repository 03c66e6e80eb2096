//! Revenue aggregation and UBI cost calculations built on top of the
//! taxation strategies.

pub mod common;
pub mod revenue;

pub use revenue::{
    Feasibility, UbiCostSummary, calculate_tax_revenue_without_ubi, total_population,
};
