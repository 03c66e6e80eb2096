//! Aggregate revenue and UBI cost figures.
//!
//! Segment incomes, taxes and the annualized UBI are in thousands; the cost
//! summary reports base currency units.
//!
//! # Cost Summary
//!
//! | Line | Description |
//! |------|-------------|
//! | 0    | Gross cost: annualized UBI × total population |
//! | 1    | Additional revenue: revenue with UBI − revenue without UBI |
//! | 2    | Net cost: line 0 − line 1 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use ubi_core::{FlatTaxStrategy, IncomeSegment, RevenuePolicy, UbiCostSummary};
//!
//! let segments = vec![
//!     IncomeSegment::new(dec!(20), dec!(100)).with_baseline_tax(dec!(1)),
//!     IncomeSegment::new(dec!(200), dec!(10)).with_baseline_tax(dec!(40)),
//! ];
//! let policy = RevenuePolicy::new(dec!(24), dec!(24));
//!
//! let summary = UbiCostSummary::calculate(&FlatTaxStrategy::new(dec!(30)), &segments, &policy);
//!
//! assert_eq!(summary.gross_cost, dec!(2640000));
//! assert_eq!(summary.additional_revenue, dec!(700000));
//! assert_eq!(summary.net_cost, dec!(1940000));
//! ```

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{saturated, to_base_units};
use crate::models::{IncomeSegment, RevenuePolicy};
use crate::strategies::TaxationStrategy;

/// Revenue collected today: each segment's baseline tax times its population.
///
/// Segments without a baseline tax contribute nothing.
pub fn calculate_tax_revenue_without_ubi(segments: &[IncomeSegment]) -> Decimal {
    segments.iter().fold(Decimal::ZERO, |total, segment| {
        let baseline = segment.baseline_tax.unwrap_or(Decimal::ZERO);
        total.saturating_add(baseline.saturating_mul(segment.population_weight))
    })
}

pub fn total_population(segments: &[IncomeSegment]) -> Decimal {
    segments.iter().fold(Decimal::ZERO, |total, segment| {
        total.saturating_add(segment.population_weight)
    })
}

/// Rough affordability band for a net UBI cost relative to GDP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feasibility {
    Surplus,
    Feasible,
    Challenging,
    Difficult,
}

impl Feasibility {
    /// Classifies a net cost expressed as a percentage of GDP.
    pub fn assess(gdp_percentage: Decimal) -> Self {
        if gdp_percentage <= Decimal::ZERO {
            Self::Surplus
        } else if gdp_percentage < dec!(5) {
            Self::Feasible
        } else if gdp_percentage < dec!(10) {
            Self::Challenging
        } else {
            Self::Difficult
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Surplus => "SURPLUS",
            Self::Feasible => "FEASIBLE",
            Self::Challenging => "CHALLENGING",
            Self::Difficult => "DIFFICULT",
        }
    }
}

impl fmt::Display for Feasibility {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cost of a UBI policy under one taxation model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UbiCostSummary {
    pub model_id: i32,

    /// Total UBI paid out (line 0), in base units.
    pub gross_cost: Decimal,

    /// Tax revenue once UBI is paid, in thousands.
    pub revenue_with_ubi: Decimal,

    /// Tax revenue today, in thousands.
    pub revenue_without_ubi: Decimal,

    /// Extra revenue caused by the UBI (line 1), in base units.
    pub additional_revenue: Decimal,

    /// Gross cost minus additional revenue (line 2), in base units.
    pub net_cost: Decimal,
}

impl UbiCostSummary {
    pub fn calculate(
        strategy: &dyn TaxationStrategy,
        segments: &[IncomeSegment],
        policy: &RevenuePolicy,
    ) -> Self {
        let gross_cost =
            to_base_units(policy.annualized_ubi.saturating_mul(total_population(segments)));
        let revenue_with_ubi = strategy.calculate_tax_revenue(segments, policy);
        let revenue_without_ubi = calculate_tax_revenue_without_ubi(segments);
        let additional_revenue =
            to_base_units(revenue_with_ubi.saturating_sub(revenue_without_ubi));

        Self {
            model_id: strategy.model_id(),
            gross_cost,
            revenue_with_ubi,
            revenue_without_ubi,
            additional_revenue,
            net_cost: gross_cost.saturating_sub(additional_revenue),
        }
    }

    /// Net cost as a percentage of `gdp` (base units). `None` for a zero GDP.
    pub fn gdp_percentage(
        &self,
        gdp: Decimal,
    ) -> Option<Decimal> {
        if gdp.is_zero() {
            return None;
        }
        let share = self.net_cost.checked_div(gdp).unwrap_or_else(|| {
            saturated(self.net_cost.is_sign_negative() != gdp.is_sign_negative())
        });
        Some(share.saturating_mul(dec!(100)))
    }

    pub fn feasibility(
        &self,
        gdp: Decimal,
    ) -> Option<Feasibility> {
        self.gdp_percentage(gdp).map(Feasibility::assess)
    }
}
