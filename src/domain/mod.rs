//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw inputs as received from data sources (`RawStatus`, `ProjectSnapshot`)
//! - canonical derived states (`CanonicalStatus`, `HealthLabel`)
//! - evaluation outputs (`Timeline`, `Evaluation`)
//! - run configuration (`RunConfig`)

pub mod types;

pub use types::*;
