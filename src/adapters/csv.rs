//! CSV dataset source
//!
//! Implements `DatasetSource` for delimited text files. The header row names
//! the fields. Rows shorter than the header leave their trailing fields
//! absent; rows longer than the header are malformed.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::core::models::{Dataset, FieldMap};
use crate::core::ports::DatasetSource;
use crate::error::{ReconcileError, Result};

/// Options for reading CSV input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Log and skip malformed rows instead of failing
    pub skip_malformed: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_malformed: false,
        }
    }
}

/// A CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvDataset {
    path: PathBuf,
    name: String,
    options: CsvOptions,
}

impl CsvDataset {
    /// Source for the file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self {
            path,
            name,
            options,
        }
    }

    /// Path of the file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for CsvDataset {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Dataset> {
        let file = File::open(&self.path)?;
        read_dataset(&self.name, file, self.options)
    }
}

/// Read a dataset from any CSV reader
pub fn read_dataset<R: Read>(name: &str, input: R, options: CsvOptions) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(str::to_string).collect(),
        Err(e) if is_row_level(&e) => return Err(row_error(name, &e)),
        Err(e) => return Err(e.into()),
    };
    if headers.is_empty() {
        debug!("{name}: no header row; dataset is empty");
        return Ok(Dataset::new(name, Vec::new()));
    }
    if let Some(dup) = first_duplicate(&headers) {
        return Err(ReconcileError::RowParse {
            dataset: name.to_string(),
            row: 1,
            reason: format!("duplicate column '{dup}'"),
        });
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if is_row_level(&e) && options.skip_malformed => {
                warn!("{}", row_error(name, &e));
                continue;
            },
            Err(e) if is_row_level(&e) => return Err(row_error(name, &e)),
            Err(e) => return Err(e.into()),
        };

        let row_number = record.position().map_or(0, csv::Position::line);
        if record.len() > headers.len() {
            let err = ReconcileError::RowParse {
                dataset: name.to_string(),
                row: row_number,
                reason: format!("expected at most {} field(s), found {}", headers.len(), record.len()),
            };
            if options.skip_malformed {
                warn!("{err}");
                continue;
            }
            return Err(err);
        }

        rows.push(headers.iter().zip(record.iter()).map(|(h, v)| (h.as_str(), v)).collect::<FieldMap>());
    }

    debug!("{name}: loaded {} row(s) with {} column(s)", rows.len(), headers.len());
    Ok(Dataset::new(name, rows))
}

fn first_duplicate(headers: &[String]) -> Option<&str> {
    headers
        .iter()
        .enumerate()
        .find(|(i, h)| headers[..*i].contains(h))
        .map(|(_, h)| h.as_str())
}

fn is_row_level(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Utf8 { .. } | csv::ErrorKind::UnequalLengths { .. })
}

fn row_error(name: &str, err: &csv::Error) -> ReconcileError {
    ReconcileError::RowParse {
        dataset: name.to_string(),
        row: err.position().map_or(0, csv::Position::line),
        reason: err.to_string(),
    }
}
