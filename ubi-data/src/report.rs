//! Tabular revenue reports for the command line.

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};
use ubi_core::{
    Feasibility, IncomeSegment, RevenuePolicy, TaxationStrategy, UbiCostSummary,
    calculations::common::round_half_up,
};

use crate::loader::IncomeSegmentRecord;

/// Cost summary of one taxation model, optionally measured against GDP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReport {
    pub model_name: &'static str,
    pub summary: UbiCostSummary,
    pub gdp_percentage: Option<Decimal>,
    pub feasibility: Option<Feasibility>,
}

impl ModelReport {
    /// `gdp` is in base currency units.
    pub fn build(
        strategy: &dyn TaxationStrategy,
        segments: &[IncomeSegmentRecord],
        policy: &RevenuePolicy,
        gdp: Option<Decimal>,
    ) -> Self {
        let segments: Vec<IncomeSegment> = segments.iter().map(IncomeSegment::from).collect();
        let summary = UbiCostSummary::calculate(strategy, &segments, policy);
        let gdp_percentage = gdp.and_then(|gdp| summary.gdp_percentage(gdp));

        Self {
            model_name: strategy.name(),
            gdp_percentage,
            feasibility: gdp_percentage.map(Feasibility::assess),
            summary,
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Revenue with UBI (k)")]
    revenue_with_ubi: String,
    #[tabled(rename = "Revenue without UBI (k)")]
    revenue_without_ubi: String,
    #[tabled(rename = "Gross Cost")]
    gross_cost: String,
    #[tabled(rename = "Additional Revenue")]
    additional_revenue: String,
    #[tabled(rename = "Net Cost")]
    net_cost: String,
    #[tabled(rename = "% of GDP")]
    gdp_percentage: String,
    #[tabled(rename = "Feasibility")]
    feasibility: String,
}

#[derive(Debug, Clone, Tabled)]
struct SegmentRow {
    #[tabled(rename = "Segment")]
    segment: String,
    #[tabled(rename = "Income with UBI (k)")]
    income_with_ubi: String,
    #[tabled(rename = "Tax (k)")]
    tax: String,
    #[tabled(rename = "Population")]
    population: String,
    #[tabled(rename = "Revenue (k)")]
    revenue: String,
}

/// One row per model.
pub fn render_summary(reports: &[ModelReport]) -> String {
    let rows: Vec<SummaryRow> = reports
        .iter()
        .map(|r| SummaryRow {
            model: r.model_name.to_string(),
            revenue_with_ubi: format_amount(r.summary.revenue_with_ubi),
            revenue_without_ubi: format_amount(r.summary.revenue_without_ubi),
            gross_cost: format_amount(r.summary.gross_cost),
            additional_revenue: format_amount(r.summary.additional_revenue),
            net_cost: format_amount(r.summary.net_cost),
            gdp_percentage: r
                .gdp_percentage
                .map_or("-".to_string(), |pct| format!("{}%", format_amount(pct))),
            feasibility: r.feasibility.map_or("-".to_string(), |f| f.to_string()),
        })
        .collect();

    styled(Table::new(rows))
}

/// Per-segment tax owed under `strategy` once the UBI is paid.
pub fn render_segments(
    strategy: &dyn TaxationStrategy,
    segments: &[IncomeSegmentRecord],
    policy: &RevenuePolicy,
) -> String {
    let rows: Vec<SegmentRow> = segments
        .iter()
        .map(|s| {
            let income_with_ubi = s.average_income.saturating_add(policy.annualized_ubi);
            let tax = strategy.calculate_tax(income_with_ubi, policy.exemption_amount);
            SegmentRow {
                segment: s.segment.clone(),
                income_with_ubi: format_amount(income_with_ubi),
                tax: format_amount(tax),
                population: format_quantity(s.population_weight),
                revenue: format_amount(tax.saturating_mul(s.population_weight)),
            }
        })
        .collect();

    styled(Table::new(rows))
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}

fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_half_up(amount))
}

fn format_quantity(qty: Decimal) -> String {
    qty.normalize().to_string()
}
