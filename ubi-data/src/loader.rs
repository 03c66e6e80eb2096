use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use ubi_core::IncomeSegment;

/// Errors that can occur when loading income segment data.
#[derive(Debug, Error)]
pub enum IncomeSegmentLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Segment '{segment}' on row {row} has a negative population weight {weight}")]
    NegativePopulation {
        segment: String,
        row: usize,
        weight: Decimal,
    },
}

impl From<csv::Error> for IncomeSegmentLoaderError {
    fn from(err: csv::Error) -> Self {
        IncomeSegmentLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the income segments CSV file.
///
/// - `segment`: Display label (e.g. "Q1")
/// - `average_income`: Average income of the segment, in thousands
/// - `population_weight`: Number of people represented by the segment
/// - `baseline_tax`: Tax paid today per person, in thousands (empty if unknown)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IncomeSegmentRecord {
    pub segment: String,
    pub average_income: Decimal,
    pub population_weight: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub baseline_tax: Option<Decimal>,
}

impl From<&IncomeSegmentRecord> for IncomeSegment {
    fn from(record: &IncomeSegmentRecord) -> Self {
        IncomeSegment {
            average_income: record.average_income,
            population_weight: record.population_weight,
            baseline_tax: record.baseline_tax,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for income segment data from CSV files.
pub struct IncomeSegmentLoader;

impl IncomeSegmentLoader {
    /// Parse income segment records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// byte slice. Rows keep their file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<IncomeSegmentRecord>, IncomeSegmentLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let record: IncomeSegmentRecord = result?;

            if record.population_weight < Decimal::ZERO {
                return Err(IncomeSegmentLoaderError::NegativePopulation {
                    segment: record.segment,
                    row: index + 1,
                    weight: record.population_weight,
                });
            }

            records.push(record);
        }

        Ok(records)
    }

    /// Parse a CSV reader straight into engine segments.
    pub fn load<R: Read>(reader: R) -> Result<Vec<IncomeSegment>, IncomeSegmentLoaderError> {
        let records = Self::parse(reader)?;
        Ok(records.iter().map(IncomeSegment::from).collect())
    }
}
