//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `csv` - Delimited text files as dataset sources
//! - `writers/` - Report renderers (pretty, csv, fail, json, noop)

pub mod csv;
pub mod writers;

pub use self::csv::{CsvDataset, CsvOptions, read_dataset};
