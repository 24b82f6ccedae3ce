use std::collections::HashMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use taxkosh_core::{AgeCategory, Slab, SlabSchedule, SlabScheduleError, TaxRegime};
use thiserror::Error;

/// Errors that can occur when loading slab schedule data.
#[derive(Debug, Error)]
pub enum SlabScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unknown age category '{0}' (expected below_60, senior or super_senior)")]
    InvalidCategory(String),

    #[error("file mixes fiscal years '{first}' and '{other}'")]
    MixedFiscalYears { first: String, other: String },

    #[error("no slabs for category '{0}'")]
    MissingCategory(&'static str),

    #[error("invalid schedule for category '{category}': {source}")]
    InvalidSchedule {
        category: &'static str,
        source: SlabScheduleError,
    },
}

impl From<csv::Error> for SlabScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        SlabScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the slab schedule CSV file.
///
/// Columns:
/// - `fiscal_year`: the fiscal year the schedule belongs to (e.g. 2024-25)
/// - `category`: the age category code (below_60, senior, super_senior)
/// - `lower_bound`: the income level where this slab starts
/// - `upper_bound`: the income level where it ends (empty for unbounded)
/// - `rate`: the marginal rate as a percentage (e.g. 5 for 5%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SlabScheduleRecord {
    pub fiscal_year: String,
    pub category: String,
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
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

/// Loader for slab schedule data from CSV files.
///
/// The loader builds validated per-category schedules and patches them
/// into a base regime, so loading a fiscal-year file replaces the slab
/// tables while keeping the base regime's cess rate, standard deduction
/// and business rates.
pub struct SlabScheduleLoader;

impl SlabScheduleLoader {
    /// Parse slab records from a CSV reader. The reader can be any type
    /// that implements `Read`, such as a file or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SlabScheduleRecord>, SlabScheduleLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SlabScheduleRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Assemble a regime from parsed records.
    ///
    /// All records must carry the same fiscal year, and every individual
    /// age category must be present. Rows may arrive in any order; each
    /// category's slabs are sorted by lower bound before validation, and
    /// schedule violations (gaps, overlaps, bounded tails) surface as
    /// [`SlabScheduleLoaderError::InvalidSchedule`].
    pub fn build_regime(
        records: &[SlabScheduleRecord],
        base: &TaxRegime,
    ) -> Result<TaxRegime, SlabScheduleLoaderError> {
        let fiscal_year = match records.first() {
            Some(record) => record.fiscal_year.clone(),
            None => {
                return Err(SlabScheduleLoaderError::MissingCategory(
                    AgeCategory::BelowSixty.as_str(),
                ));
            }
        };

        let mut groups: HashMap<AgeCategory, Vec<Slab>> = HashMap::new();
        for record in records {
            if record.fiscal_year != fiscal_year {
                return Err(SlabScheduleLoaderError::MixedFiscalYears {
                    first: fiscal_year.clone(),
                    other: record.fiscal_year.clone(),
                });
            }

            let category = AgeCategory::parse(&record.category)
                .ok_or_else(|| SlabScheduleLoaderError::InvalidCategory(record.category.clone()))?;
            groups.entry(category).or_default().push(Slab::new(
                record.lower_bound,
                record.upper_bound,
                record.rate,
            ));
        }

        let mut schedule_for = |category: AgeCategory| {
            let mut slabs = groups
                .remove(&category)
                .ok_or(SlabScheduleLoaderError::MissingCategory(category.as_str()))?;
            slabs.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));
            SlabSchedule::new(slabs).map_err(|source| SlabScheduleLoaderError::InvalidSchedule {
                category: category.as_str(),
                source,
            })
        };

        let below_sixty = schedule_for(AgeCategory::BelowSixty)?;
        let senior = schedule_for(AgeCategory::Senior)?;
        let super_senior = schedule_for(AgeCategory::SuperSenior)?;

        let mut regime = base.clone();
        regime.fiscal_year = fiscal_year;
        regime.below_sixty = below_sixty;
        regime.senior = senior;
        regime.super_senior = super_senior;
        Ok(regime)
    }

    /// Parse a CSV reader and assemble a regime on top of the built-in
    /// FY 2024-25 defaults.
    pub fn load<R: Read>(reader: R) -> Result<TaxRegime, SlabScheduleLoaderError> {
        let records = Self::parse(reader)?;
        Self::build_regime(&records, &TaxRegime::fy_2024_25())
    }
}
