//! JSON writer

use crate::core::models::ReconciliationReport;
use crate::core::ports::{DiffWriter, RenderedOutput};
use crate::error::Result;

/// Writes the whole report, summary included, as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl DiffWriter for JsonWriter {
    fn render(&self, report: &ReconciliationReport) -> Result<RenderedOutput> {
        let mut content = serde_json::to_string_pretty(report)?;
        content.push('\n');
        Ok(RenderedOutput::new(content))
    }
}
