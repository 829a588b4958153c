//! No-op writer

use crate::core::models::ReconciliationReport;
use crate::core::ports::{DiffWriter, RenderedOutput};
use crate::error::Result;

/// Discards the report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpWriter;

impl DiffWriter for NoOpWriter {
    fn render(&self, _report: &ReconciliationReport) -> Result<RenderedOutput> {
        Ok(RenderedOutput::empty())
    }
}
