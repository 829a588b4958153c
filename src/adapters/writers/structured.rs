//! Structured writer - one CSV row per field diff
//!
//! Columns: `key,relationship,field,source_value,target_value,status`.
//! Keys without field diffs (`ONLY_IN_*`, `DUPLICATE_KEY`, identical matches
//! with nothing compared) get a single summary row with the last four columns
//! empty. [`parse_structured`] reads this format back into a report.

use std::io;

use crate::core::models::{
    FieldDiff, FieldStatus, FieldValue, ReconciliationReport, RecordDiff, RecordKey, Relationship,
};
use crate::core::ports::{DiffWriter, RenderedOutput};
use crate::error::{ReconcileError, Result};

/// Column header of the structured format
pub const HEADER: [&str; 6] = ["key", "relationship", "field", "source_value", "target_value", "status"];

/// Dataset label used in parse errors
const SOURCE_LABEL: &str = "structured output";

/// CSV writer for downstream tooling
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl DiffWriter for CsvWriter {
    fn render(&self, report: &ReconciliationReport) -> Result<RenderedOutput> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(HEADER)?;

        for diff in report.record_diffs() {
            let key = diff.key.to_string();
            let relationship = diff.relationship.as_str();
            if diff.field_diffs.is_empty() {
                writer.write_record([key.as_str(), relationship, "", "", "", ""])?;
                continue;
            }
            for field in &diff.field_diffs {
                let source = field.source_value.as_ref().map(FieldValue::as_text).unwrap_or_default();
                let target = field.target_value.as_ref().map(FieldValue::as_text).unwrap_or_default();
                writer.write_record([
                    key.as_str(),
                    relationship,
                    field.field_name.as_str(),
                    &*source,
                    &*target,
                    field.status.as_str(),
                ])?;
            }
        }

        let bytes = writer.into_inner().map_err(|e| ReconcileError::Io(e.into_error()))?;
        String::from_utf8(bytes)
            .map(RenderedOutput::new)
            .map_err(|e| ReconcileError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Read structured output back into a report
///
/// Values come back as text. `ADDED` rows restore an absent source value and
/// `REMOVED` rows an absent target value. Rows for the same key must be
/// adjacent, as the writer emits them.
pub fn parse_structured(input: &str) -> Result<ReconciliationReport> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(input.as_bytes());

    let headers = reader.headers()?.clone();
    if !headers.iter().eq(HEADER) {
        let found: Vec<&str> = headers.iter().collect();
        return Err(parse_error(1, format!("unexpected header '{}'", found.join(","))));
    }

    let mut diffs: Vec<RecordDiff> = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map_or(0, csv::Position::line);
        let key = RecordKey::parse(&row[0]);
        let relationship: Relationship = row[1].parse().map_err(|e: String| parse_error(line, e))?;

        let field_diff = if row[2].is_empty() && row[5].is_empty() {
            None
        } else {
            let status: FieldStatus = row[5].parse().map_err(|e: String| parse_error(line, e))?;
            Some(FieldDiff {
                field_name: row[2].to_string(),
                source_value: (status != FieldStatus::Added).then(|| FieldValue::from(&row[3])),
                target_value: (status != FieldStatus::Removed).then(|| FieldValue::from(&row[4])),
                status,
            })
        };

        match diffs.last_mut() {
            Some(last) if last.key == key => {
                if last.relationship != relationship {
                    return Err(parse_error(line, format!("conflicting relationships for key '{key}'")));
                }
                if let Some(field_diff) = field_diff {
                    last.field_diffs.push(field_diff);
                }
            },
            _ => diffs.push(RecordDiff {
                key,
                relationship,
                field_diffs: field_diff.into_iter().collect(),
                candidates: None,
            }),
        }
    }

    Ok(ReconciliationReport::new(diffs))
}

fn parse_error(row: u64, reason: impl Into<String>) -> ReconcileError {
    ReconcileError::RowParse {
        dataset: SOURCE_LABEL.to_string(),
        row,
        reason: reason.into(),
    }
}
