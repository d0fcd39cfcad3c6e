//! Data Cleaner Module
//! Selects and renames the report columns, drops incomplete rows, coerces
//! weights and normalizes the two status columns.

use crate::data::record::{
    Dataset, Record, Status, DAC_NAME, DISTRICT, FBA_NAME, HARVEST_AMOUNT, HARVEST_STATUS,
    REGION, SEEDS_USED, THRESHING_STATUS,
};
use polars::prelude::*;
use thiserror::Error;

/// Source column -> cleaned column.
pub const SOURCE_COLUMNS: [(&str, &str); 8] = [
    ("Region", REGION),
    ("District", DISTRICT),
    ("FBA Name", FBA_NAME),
    ("DAC's Name", DAC_NAME),
    ("Amount of seed supplied in kgs", SEEDS_USED),
    ("Harvest status", HARVEST_STATUS),
    ("Threshing status", THRESHING_STATUS),
    ("Harvested in Kgs", HARVEST_AMOUNT),
];

/// Rows missing any of these are dropped.
pub const IDENTIFIER_COLUMNS: [&str; 4] = [REGION, DISTRICT, FBA_NAME, DAC_NAME];

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Spreadsheet is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Normalization rules applied while cleaning.
#[derive(Debug, Clone)]
pub struct CleaningPolicy {
    /// Exact, case-sensitive value meaning a stage is finished.
    pub done_marker: String,
}

impl Default for CleaningPolicy {
    fn default() -> Self {
        Self {
            done_marker: "DONE".to_string(),
        }
    }
}

/// What the cleaning pass absorbed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub numeric_coerced: usize,
    pub statuses_not_done: usize,
}

/// Turns the raw text table into the typed [`Dataset`].
pub struct DataCleaner {
    policy: CleaningPolicy,
}

impl DataCleaner {
    pub fn new(policy: CleaningPolicy) -> Self {
        Self { policy }
    }

    /// Names of required source columns absent from `raw`.
    pub fn missing_columns(raw: &DataFrame) -> Vec<String> {
        let present: Vec<String> = raw
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        SOURCE_COLUMNS
            .iter()
            .filter(|(source, _)| !present.iter().any(|p| p.as_str() == *source))
            .map(|(source, _)| source.to_string())
            .collect()
    }

    /// Run the full cleaning pipeline.
    pub fn clean(&self, raw: &DataFrame) -> Result<(Dataset, CleanReport), CleanError> {
        let missing = Self::missing_columns(raw);
        if !missing.is_empty() {
            return Err(CleanError::MissingColumns(missing));
        }

        let df = self.normalize(raw)?;

        let region = df.column(REGION)?.str()?;
        let district = df.column(DISTRICT)?.str()?;
        let fba = df.column(FBA_NAME)?.str()?;
        let dac = df.column(DAC_NAME)?.str()?;
        let seeds = df.column(SEEDS_USED)?.f64()?;
        let harvest_done = df.column(HARVEST_STATUS)?.bool()?;
        let threshing_done = df.column(THRESHING_STATUS)?.bool()?;
        let amount = df.column(HARVEST_AMOUNT)?.f64()?;

        let mut report = CleanReport {
            rows_read: raw.height(),
            ..Default::default()
        };
        let mut records = Vec::with_capacity(df.height());

        for i in 0..df.height() {
            let (Some(region), Some(district), Some(fba), Some(dac)) =
                (region.get(i), district.get(i), fba.get(i), dac.get(i))
            else {
                continue;
            };

            let seeds_used_kgs = coerce_kgs(seeds.get(i), &mut report);
            let harvest_amount_kgs = coerce_kgs(amount.get(i), &mut report);
            let harvest_status = Status::from_done(harvest_done.get(i).unwrap_or(false));
            let threshing_status = Status::from_done(threshing_done.get(i).unwrap_or(false));

            report.statuses_not_done += [harvest_status, threshing_status]
                .iter()
                .filter(|s| **s == Status::NotYet)
                .count();

            records.push(Record {
                region: region.to_string(),
                district: district.to_string(),
                fba_name: fba.to_string(),
                dac_name: dac.to_string(),
                seeds_used_kgs,
                harvest_status,
                threshing_status,
                harvest_amount_kgs,
            });
        }

        report.rows_dropped = report.rows_read - records.len();
        Ok((Dataset::from_records(records), report))
    }

    /// Lazy select/rename/drop/cast pass.
    ///
    /// Output columns: the eight cleaned names; weights as nullable Float64,
    /// statuses as Boolean "is done".
    fn normalize(&self, raw: &DataFrame) -> Result<DataFrame, CleanError> {
        let renamed: Vec<Expr> = SOURCE_COLUMNS
            .iter()
            .map(|(source, target)| col(*source).cast(DataType::String).alias(*target))
            .collect();

        let complete = IDENTIFIER_COLUMNS
            .iter()
            .map(|c| col(*c).is_not_null())
            .reduce(|acc, e| acc.and(e))
            .unwrap_or_else(|| lit(true));

        let marker = self.policy.done_marker.as_str();
        let is_done = |c: &str| col(c).eq(lit(marker)).fill_null(lit(false)).alias(c);
        // Padding is tolerated around numbers but not around the marker
        let kgs = |c: &str| {
            col(c)
                .str()
                .strip_chars(lit(NULL))
                .cast(DataType::Float64)
                .alias(c)
        };

        let df = raw
            .clone()
            .lazy()
            .select(renamed)
            .filter(complete)
            .with_columns([
                kgs(SEEDS_USED),
                kgs(HARVEST_AMOUNT),
                is_done(HARVEST_STATUS),
                is_done(THRESHING_STATUS),
            ])
            .collect()?;

        Ok(df)
    }
}

/// Unparseable, negative or non-finite weights become 0.
fn coerce_kgs(value: Option<f64>, report: &mut CleanReport) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => {
            report.numeric_coerced += 1;
            0.0
        }
    }
}
