//! Input/output helpers.
//!
//! - portfolio ingest + row-level validation, JSON and CSV (`ingest`)
//! - evaluation exports, CSV and JSON report (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
