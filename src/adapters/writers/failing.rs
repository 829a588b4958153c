//! Failing writer

use crate::core::models::ReconciliationReport;
use crate::core::ports::{DiffWriter, RenderedOutput};
use crate::error::{ReconcileError, Result};

/// Writer that fails when the report holds any difference
///
/// Meant for CI gates: a clean report renders nothing, anything other than
/// `MATCHED_IDENTICAL` becomes [`ReconcileError::ReconciliationFailure`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingWriter;

impl DiffWriter for FailingWriter {
    fn render(&self, report: &ReconciliationReport) -> Result<RenderedOutput> {
        let summary = report.summary();
        if summary.has_differences() {
            return Err(ReconcileError::ReconciliationFailure { summary: *summary });
        }
        Ok(RenderedOutput::empty())
    }
}
