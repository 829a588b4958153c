//! Command implementations

mod reconcile;
mod writers;

pub use reconcile::reconcile;
pub use writers::list_writers;
