//! Diff writer port
//!
//! Defines the interface for rendering a reconciliation report. Writers render
//! the whole output in memory; callers write it out only once rendering has
//! succeeded, so a failed render never leaves partial output behind.

use std::fmt;
use std::io::{self, Write};

use crate::core::models::ReconciliationReport;
use crate::error::Result;

/// A fully rendered report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedOutput {
    content: String,
}

impl RenderedOutput {
    /// Output with the given content
    #[must_use]
    pub const fn new(content: String) -> Self {
        Self { content }
    }

    /// Output with nothing to write
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            content: String::new(),
        }
    }

    /// Rendered text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Whether there is nothing to write
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Write the content to a sink
    pub fn write_to(&self, sink: &mut dyn Write) -> io::Result<()> {
        sink.write_all(self.content.as_bytes())?;
        sink.flush()
    }
}

impl From<String> for RenderedOutput {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

/// Renders reconciliation reports
///
/// Writers only read the report. Apart from the failing writer, a writer
/// must not fail just because the report contains differences.
pub trait DiffWriter: fmt::Debug {
    /// Render the report
    fn render(&self, report: &ReconciliationReport) -> Result<RenderedOutput>;
}
