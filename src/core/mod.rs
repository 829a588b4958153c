//! Core reconciliation logic
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Record, RecordKey, FieldDiff, ReconciliationReport)
//! - `services/` - Matching, field comparison and reconciliation
//! - `ports/` - Trait definitions for dataset sources and diff writers

pub mod models;
pub mod ports;
pub mod services;
