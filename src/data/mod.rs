//! Data sources that are not files.
//!
//! Currently only the deterministic synthetic portfolio (`sample`), used for
//! demos and end-to-end tests.

pub mod sample;

pub use sample::*;
