use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::info;
use ubi_core::{TaxModelKind, TaxationStrategy, TaxationStrategyFactory};
use ubi_data::{
    IncomeSegmentLoader, ModelReport, PolicyConfig, logging,
    report::{render_segments, render_summary},
};

/// Estimate the tax revenue and net cost of a universal basic income.
///
/// The segments CSV file should have the following columns:
/// - segment: A label for the income segment (e.g. Q1)
/// - average_income: Average income of the segment, in thousands
/// - population_weight: Number of people in the segment
/// - baseline_tax: Tax paid today per person, in thousands (may be empty)
#[derive(Parser, Debug)]
#[command(name = "ubi-revenue")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing income segments
    #[arg(short, long, required_unless_present = "model_data")]
    segments: Option<PathBuf>,

    /// Path to a TOML policy config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only evaluate this taxation model (1 flat, 2 progressive, 3 bell curve)
    #[arg(short, long)]
    model: Option<i32>,

    /// Monthly UBI per person, in currency units (overrides the config)
    #[arg(long)]
    monthly_ubi: Option<Decimal>,

    /// Tax exemption, in thousands (overrides the config)
    #[arg(long)]
    exemption: Option<Decimal>,

    /// GDP in currency units, used to rate feasibility
    #[arg(long)]
    gdp: Option<Decimal>,

    /// Print the per-segment tax table for each model
    #[arg(long, default_value_t = false)]
    detailed: bool,

    /// Print the model data as JSON instead of the revenue report
    #[arg(long, default_value_t = false)]
    model_data: bool,

    /// Log filter, e.g. "debug" or "ubi_core=debug"
    #[arg(long)]
    log_level: Option<String>,

    /// Append log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging();
    if let Some(level) = &args.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &args.log_file {
        logging::enable_file_logging(path)?;
    }

    let mut config = match &args.config {
        Some(path) => PolicyConfig::read(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => PolicyConfig::default(),
    };
    if let Some(model) = args.model {
        config.model_id = model;
    }
    if let Some(monthly_ubi) = args.monthly_ubi {
        config.monthly_ubi = monthly_ubi;
    }
    if let Some(exemption) = args.exemption {
        config.exemption_amount = exemption;
    }

    let kinds = match args.model {
        Some(model) => vec![
            TaxModelKind::try_from(model).with_context(|| format!("Invalid model: {model}"))?,
        ],
        None => TaxModelKind::all().to_vec(),
    };

    let strategies = kinds
        .iter()
        .map(|kind| -> Result<Box<dyn TaxationStrategy>> {
            config
                .validate_for(*kind)
                .with_context(|| format!("Invalid parameters for {}", kind.name()))?;
            Ok(TaxationStrategyFactory::from_config(
                &config.strategy_config_for(*kind),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    if args.model_data {
        let data: Vec<_> = strategies
            .iter()
            .map(|strategy| strategy.model_data(config.ubi_id))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&data).context("Failed to serialize model data")?
        );
        return Ok(());
    }

    let segments_path = args
        .segments
        .as_ref()
        .context("--segments is required for the revenue report")?;
    let file = File::open(segments_path)
        .with_context(|| format!("Failed to open: {}", segments_path.display()))?;
    let records = IncomeSegmentLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", segments_path.display()))?;

    let policy = config.revenue_policy();
    info!(
        segments = records.len(),
        annualized_ubi = %policy.annualized_ubi,
        exemption = %policy.exemption_amount,
        "evaluating UBI policy"
    );

    let mut reports = Vec::with_capacity(strategies.len());
    for strategy in &strategies {
        if args.detailed {
            println!();
            println!("{}", strategy.name().to_uppercase());
            println!("{}", render_segments(strategy.as_ref(), &records, &policy));
        }
        reports.push(ModelReport::build(
            strategy.as_ref(),
            &records,
            &policy,
            args.gdp,
        ));
    }

    println!();
    println!("UBI COST SUMMARY");
    println!("{}", render_summary(&reports));

    Ok(())
}
