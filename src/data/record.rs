//! Cleaned record model
//! One row per (FBA, DAC) reporting relationship, immutable after load.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Column names of the cleaned table.
pub const REGION: &str = "Region";
pub const DISTRICT: &str = "District";
pub const FBA_NAME: &str = "FBA_Name";
pub const DAC_NAME: &str = "DAC_Name";
pub const SEEDS_USED: &str = "Seeds_Used_in_Kgs";
pub const HARVEST_STATUS: &str = "Harvest_Status";
pub const THRESHING_STATUS: &str = "Threshing_Status";
pub const HARVEST_AMOUNT: &str = "Harvest_Amount_in_Kgs";

/// Binary completion marker for harvest and threshing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    #[serde(rename = "DONE")]
    Done,
    #[serde(rename = "NOT YET")]
    NotYet,
}

impl Status {
    pub fn from_done(done: bool) -> Self {
        if done {
            Status::Done
        } else {
            Status::NotYet
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Done => "DONE",
            Status::NotYet => "NOT YET",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single cleaned row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "FBA_Name")]
    pub fba_name: String,
    #[serde(rename = "DAC_Name")]
    pub dac_name: String,
    #[serde(rename = "Seeds_Used_in_Kgs")]
    pub seeds_used_kgs: f64,
    #[serde(rename = "Harvest_Status")]
    pub harvest_status: Status,
    #[serde(rename = "Threshing_Status")]
    pub threshing_status: Status,
    #[serde(rename = "Harvest_Amount_in_Kgs")]
    pub harvest_amount_kgs: f64,
}

/// Filterable / groupable columns of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Region,
    District,
    FbaName,
    DacName,
    HarvestStatus,
    ThreshingStatus,
}

impl Dimension {
    /// Column name in the cleaned table.
    pub fn column(&self) -> &'static str {
        match self {
            Dimension::Region => REGION,
            Dimension::District => DISTRICT,
            Dimension::FbaName => FBA_NAME,
            Dimension::DacName => DAC_NAME,
            Dimension::HarvestStatus => HARVEST_STATUS,
            Dimension::ThreshingStatus => THRESHING_STATUS,
        }
    }

    /// Dropdown caption.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Region => "Select Region:",
            Dimension::District => "Select District:",
            Dimension::FbaName => "Select FBA:",
            Dimension::DacName => "Select DAC:",
            Dimension::HarvestStatus => "Harvest Status:",
            Dimension::ThreshingStatus => "Threshing Status:",
        }
    }

    pub fn value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            Dimension::Region => &record.region,
            Dimension::District => &record.district,
            Dimension::FbaName => &record.fba_name,
            Dimension::DacName => &record.dac_name,
            Dimension::HarvestStatus => record.harvest_status.label(),
            Dimension::ThreshingStatus => record.threshing_status.label(),
        }
    }
}

/// The cleaned, read-only table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct values of a dimension in order of first appearance.
    pub fn distinct(&self, dimension: Dimension) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| dimension.value(r))
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::too_many_arguments)]
pub(crate) fn record(
    region: &str,
    district: &str,
    fba: &str,
    dac: &str,
    seeds: f64,
    harvest: Status,
    threshing: Status,
    amount: f64,
) -> Record {
    Record {
        region: region.to_string(),
        district: district.to_string(),
        fba_name: fba.to_string(),
        dac_name: dac.to_string(),
        seeds_used_kgs: seeds,
        harvest_status: harvest,
        threshing_status: threshing,
        harvest_amount_kgs: amount,
    }
}
