//! Diff writer implementations
//!
//! - [`pretty`] - Human-readable summary and change listing
//! - [`structured`] - Machine-readable CSV, with a parser for reading it back
//! - [`failing`] - Fails the run when any difference exists
//! - [`json`] - Full report as JSON
//! - [`noop`] - Discards the report

pub mod failing;
pub mod json;
pub mod noop;
pub mod pretty;
pub mod structured;

pub use failing::FailingWriter;
pub use json::JsonWriter;
pub use noop::NoOpWriter;
pub use pretty::PrettyWriter;
pub use structured::{CsvWriter, parse_structured};

/// Settings passed to writer factories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// Emit ANSI colour codes (only meaningful for human output)
    pub color: bool,
}
