//! Port traits (interfaces) for external collaborators
//!
//! These traits define the boundaries between the reconciliation core and
//! the outside world (dataset loading, report rendering).
//!
//! Implementations live in the `adapters` module.

mod dataset;
mod writer;

pub use dataset::DatasetSource;
pub use writer::{DiffWriter, RenderedOutput};
