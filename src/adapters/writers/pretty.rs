//! Pretty writer - human-readable report

use std::fmt::Write as _;

use colored::{Color, Colorize};

use super::WriterOptions;
use crate::core::models::{
    FieldDiff, FieldStatus, FieldValue, ReconciliationReport, RecordDiff, Relationship,
};
use crate::core::ports::{DiffWriter, RenderedOutput};
use crate::error::Result;

/// Summary table plus one block per key that is not `MATCHED_IDENTICAL`
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyWriter {
    color: bool,
}

impl PrettyWriter {
    /// Create a writer; `options.color` enables ANSI colours
    #[must_use]
    pub const fn new(options: WriterOptions) -> Self {
        Self {
            color: options.color,
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn render_entry(&self, out: &mut String, diff: &RecordDiff) {
        let (marker, color) = match diff.relationship {
            Relationship::MatchedIdentical => return,
            Relationship::MatchedDifferent => ("~", Color::Yellow),
            Relationship::OnlyInSource => ("-", Color::Red),
            Relationship::OnlyInTarget => ("+", Color::Green),
            Relationship::DuplicateKey => ("!", Color::Magenta),
        };
        let _ = writeln!(
            out,
            "  {} {}  {}",
            self.paint(marker, color),
            diff.key,
            self.paint(diff.relationship.as_str(), color)
        );

        for change in diff.changes() {
            let _ = writeln!(out, "      {}", describe_change(change));
        }
        if let Some(candidates) = &diff.candidates {
            let _ = writeln!(
                out,
                "      {} source / {} target record(s) share this key",
                candidates.source.len(),
                candidates.target.len()
            );
        }
    }
}

fn show(value: Option<&FieldValue>) -> String {
    match value {
        None => "(absent)".to_string(),
        Some(FieldValue::Null) => "null".to_string(),
        Some(v) => format!("{:?}", v.as_text()),
    }
}

fn describe_change(change: &FieldDiff) -> String {
    let source = show(change.source_value.as_ref());
    let target = show(change.target_value.as_ref());
    match change.status {
        FieldStatus::Added => format!("{}: added {target}", change.field_name),
        FieldStatus::Removed => format!("{}: removed {source}", change.field_name),
        FieldStatus::Changed | FieldStatus::Unchanged => {
            format!("{}: {source} -> {target}", change.field_name)
        },
    }
}

impl DiffWriter for PrettyWriter {
    fn render(&self, report: &ReconciliationReport) -> Result<RenderedOutput> {
        let summary = report.summary();
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.heading("Reconciliation summary"));
        for relationship in Relationship::ALL {
            let _ = writeln!(out, "  {:<18} {}", relationship.as_str(), summary.count(relationship));
        }
        let _ = writeln!(out);

        if !summary.has_differences() {
            let _ = writeln!(out, "{}", self.paint("No differences.", Color::Green));
            return Ok(RenderedOutput::new(out));
        }

        let _ = writeln!(out, "{}", self.heading("Differences"));
        for diff in report.differences() {
            self.render_entry(&mut out, diff);
        }
        Ok(RenderedOutput::new(out))
    }
}
