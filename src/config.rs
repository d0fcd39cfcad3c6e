//! Configuration for the dashboard
//!
//! CLI arguments and environment variable handling using clap. Every flag
//! defaults to the behavior of a plain `harvest_dashboard` launch.

use crate::data::{CleaningPolicy, LoadOptions};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Initial state of every dropdown when a page opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DefaultSelection {
    /// Every observed value selected
    #[default]
    All,
    /// Nothing selected (charts start empty)
    None,
}

/// Agent Performance Dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "harvest_dashboard")]
#[command(about = "Seed distribution and harvest outcome dashboard")]
pub struct Args {
    /// Spreadsheet to load (.xlsx, .xls, .xlsb, .ods or .csv)
    #[arg(env = "HARVEST_FILE", default_value = "HARVERST.xlsx")]
    pub path: PathBuf,

    /// Worksheet name (defaults to the first sheet)
    #[arg(long, env = "HARVEST_SHEET")]
    pub sheet: Option<String>,

    /// Zero-based index of the header row
    #[arg(long, env = "HARVEST_HEADER_ROW", default_value_t = 1)]
    pub header_row: usize,

    /// Exact, case-sensitive status value meaning "done"
    #[arg(long, env = "HARVEST_DONE_MARKER", default_value = "DONE")]
    pub done_marker: String,

    /// Initial dropdown selection
    #[arg(long, env = "HARVEST_DEFAULT_SELECTION", value_enum, default_value_t = DefaultSelection::All)]
    pub default_selection: DefaultSelection,

    /// Page shown at startup
    #[arg(long, env = "HARVEST_START_PATH", default_value = "/")]
    pub start_path: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.done_marker.is_empty() {
            return Err("--done-marker must not be empty".to_string());
        }
        if !self.start_path.starts_with('/') {
            return Err(format!(
                "--start-path must begin with '/', got '{}'",
                self.start_path
            ));
        }
        Ok(())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            header_row: self.header_row,
            sheet: self.sheet.clone(),
        }
    }

    pub fn cleaning_policy(&self) -> CleaningPolicy {
        CleaningPolicy {
            done_marker: self.done_marker.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_plain_dashboard() {
        let args = Args::try_parse_from(["harvest_dashboard"]).unwrap();

        assert_eq!(args.path, PathBuf::from("HARVERST.xlsx"));
        assert_eq!(args.header_row, 1);
        assert_eq!(args.done_marker, "DONE");
        assert_eq!(args.default_selection, DefaultSelection::All);
        assert_eq!(args.start_path, "/");
        assert!(args.sheet.is_none());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "harvest_dashboard",
            "report.csv",
            "--header-row",
            "0",
            "--done-marker",
            "Yes",
            "--default-selection",
            "none",
            "--start-path",
            "/dac-performance",
        ])
        .unwrap();

        assert_eq!(args.load_options().header_row, 0);
        assert_eq!(args.cleaning_policy().done_marker, "Yes");
        assert_eq!(args.default_selection, DefaultSelection::None);
        assert_eq!(args.start_path, "/dac-performance");
    }

    #[test]
    fn rejects_invalid_values() {
        let mut args = Args::try_parse_from(["harvest_dashboard"]).unwrap();
        args.done_marker.clear();
        assert!(args.validate().is_err());

        let mut args = Args::try_parse_from(["harvest_dashboard"]).unwrap();
        args.start_path = "dac-performance".to_string();
        assert!(args.validate().is_err());
    }
}
