//! Spreadsheet Loader Module
//! Reads a workbook (calamine) or CSV file (Polars) into a raw all-text DataFrame.

use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Spreadsheet not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Unsupported spreadsheet format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Worksheet '{0}' not found")]
    MissingSheet(String),
    #[error("Workbook has no worksheets")]
    NoSheets,
    #[error("Header row {0} is past the end of the sheet")]
    MissingHeader(usize),
    #[error("Failed to build table: {0}")]
    Polars(#[from] PolarsError),
}

/// Where in the file the table lives.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Zero-based index of the header row; rows above it are ignored.
    pub header_row: usize,
    /// Worksheet name; the first sheet when `None`.
    pub sheet: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            header_row: 1,
            sheet: None,
        }
    }
}

/// Loads the raw spreadsheet; every column comes back as nullable text.
pub struct DataLoader {
    options: LoadOptions,
}

impl DataLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Load a spreadsheet, dispatching on the file extension.
    pub fn load(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let df = match extension.as_str() {
            "csv" => self.load_csv(path)?,
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => self.load_workbook(path)?,
            _ => return Err(LoaderError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "raw spreadsheet loaded"
        );
        Ok(df)
    }

    fn load_csv(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        // Schema inference disabled so every column stays text until cleaning
        let df = LazyCsvReader::new(path)
            .with_skip_rows(self.options.header_row)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_truncate_ragged_lines(true)
            .finish()?
            .collect()?;

        Ok(df)
    }

    fn load_workbook(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        let mut workbook = open_workbook_auto(path)?;

        let sheet_name = match &self.options.sheet {
            Some(name) => {
                if !workbook.sheet_names().iter().any(|s| s == name) {
                    return Err(LoaderError::MissingSheet(name.clone()));
                }
                name.clone()
            }
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or(LoaderError::NoSheets)?,
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        // Ranges start at the first used cell, not at A1
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        // Blank rows above the first used row are not counted, so a header
        // row above it falls back to the first used row
        let skip = self.options.header_row.saturating_sub(first_row);

        let mut rows = range.rows().skip(skip);
        let header = rows
            .next()
            .ok_or(LoaderError::MissingHeader(self.options.header_row))?;
        let names = header_names(header.iter().map(cell_text));

        let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
        for row in rows {
            for (i, column) in values.iter_mut().enumerate() {
                column.push(row.get(i).and_then(cell_text));
            }
        }

        let columns = names
            .into_iter()
            .zip(values)
            .map(|(name, column)| Column::new(name.into(), column))
            .collect();

        Ok(DataFrame::new(columns)?)
    }
}

/// Textual form of a cell; blanks and error cells are missing.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Make header cells usable as unique column names.
fn header_names<I>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    cells
        .into_iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = cell.unwrap_or_else(|| format!("Unnamed: {}", i));
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CleaningPolicy, DataCleaner, Status};
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn csv_header_is_read_from_second_row() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "harvest.csv",
            "HARVEST REPORT,,\nRegion,District,Harvested in Kgs\nNorth,A,12\nSouth,,x\n",
        );

        let df = DataLoader::new(LoadOptions::default()).load(&path).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["Region", "District", "Harvested in Kgs"]);
        assert_eq!(df.height(), 2);

        let amounts = df.column("Harvested in Kgs").unwrap();
        assert_eq!(amounts.dtype(), &DataType::String);
        assert_eq!(amounts.str().unwrap().get(1), Some("x"));
        assert_eq!(df.column("District").unwrap().str().unwrap().get(1), None);
    }

    #[test]
    fn header_offset_is_configurable() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "flat.csv", "Region,District\nNorth,A\n");

        let loader = DataLoader::new(LoadOptions {
            header_row: 0,
            sheet: None,
        });
        let df = loader.load(&path).unwrap();

        assert!(df.column("Region").is_ok());
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = DataLoader::new(LoadOptions::default())
            .load(&dir.path().join("HARVERST.xlsx"))
            .unwrap_err();

        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "harvest.txt", "Region\nNorth\n");

        let err = DataLoader::new(LoadOptions::default())
            .load(&path)
            .unwrap_err();

        assert!(matches!(err, LoaderError::UnsupportedFormat(_)));
    }

    #[test]
    fn header_names_are_made_unique() {
        let names = header_names(vec![
            Some("Region".to_string()),
            None,
            Some("Region".to_string()),
            Some("Region".to_string()),
        ]);

        assert_eq!(names, vec!["Region", "Unnamed: 1", "Region.1", "Region.2"]);
    }

    #[test]
    fn cell_text_treats_blanks_as_missing() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String(String::new())), None);
        assert_eq!(cell_text(&Data::String("DONE".into())), Some("DONE".into()));
        assert_eq!(cell_text(&Data::Float(12.5)), Some("12.5".into()));
        assert_eq!(cell_text(&Data::Int(7)), Some("7".into()));
    }

    const HEADER: [&str; 8] = [
        "Region",
        "District",
        "FBA Name",
        "DAC's Name",
        "Amount of seed supplied in kgs",
        "Harvest status",
        "Threshing status",
        "Harvested in Kgs",
    ];

    /// Title on `title_row`, header on the next row, then three data rows:
    /// a numeric District cell, a padded weight, and a row missing its DAC.
    fn write_workbook(dir: &TempDir, title_row: u32) -> PathBuf {
        let path = dir.path().join("HARVERST.xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        {
            let sheet = workbook.add_worksheet();
            sheet.set_name("Harvest").unwrap();
            sheet.write_string(title_row, 0, "HARVEST REPORT").unwrap();

            let header = title_row + 1;
            for (col, name) in HEADER.iter().enumerate() {
                sheet.write_string(header, col as u16, *name).unwrap();
            }

            let rows = [
                ["North", "", "F1", "D1", "", "DONE", "NOT YET", "abc"],
                ["South", "B", "F2", "D2", " 7", "DONE", "DONE", ""],
                ["East", "C", "F3", "", "1", "NOT YET", "NOT YET", "2"],
            ];
            for (i, row) in rows.iter().enumerate() {
                let r = header + 1 + i as u32;
                for (col, value) in row.iter().enumerate() {
                    if !value.is_empty() {
                        sheet.write_string(r, col as u16, *value).unwrap();
                    }
                }
            }
            sheet.write_number(header + 1, 1, 5.0).unwrap();
            sheet.write_number(header + 1, 4, 12.5).unwrap();
            sheet.write_number(header + 2, 7, 30.0).unwrap();
        }
        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn workbook_header_is_read_from_second_row() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(&dir, 0);

        let raw = DataLoader::new(LoadOptions::default()).load(&path).unwrap();
        assert_eq!(raw.shape(), (3, 8));

        let (ds, report) = DataCleaner::new(CleaningPolicy::default())
            .clean(&raw)
            .unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(report.rows_dropped, 1);
        let first = &ds.records()[0];
        assert_eq!(first.district, "5");
        assert_eq!(first.seeds_used_kgs, 12.5);
        assert_eq!(first.harvest_amount_kgs, 0.0);
        assert_eq!(first.threshing_status, Status::NotYet);
        let second = &ds.records()[1];
        assert_eq!(second.seeds_used_kgs, 7.0);
        assert_eq!(second.harvest_amount_kgs, 30.0);
        assert_eq!(second.threshing_status, Status::Done);
    }

    #[test]
    fn workbook_offset_accounts_for_leading_blank_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(&dir, 2);
        let loader = DataLoader::new(LoadOptions {
            header_row: 3,
            sheet: Some("Harvest".to_string()),
        });

        let raw = loader.load(&path).unwrap();

        assert_eq!(raw.shape(), (3, 8));
        assert_eq!(
            raw.column("FBA Name").unwrap().str().unwrap().get(2),
            Some("F3")
        );
    }

    #[test]
    fn unknown_worksheet_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(&dir, 0);
        let loader = DataLoader::new(LoadOptions {
            sheet: Some("Summary".to_string()),
            ..LoadOptions::default()
        });

        let err = loader.load(&path).unwrap_err();

        assert!(matches!(err, LoaderError::MissingSheet(name) if name == "Summary"));
    }
}
