//! Input helpers.
//!
//! - profile ingest + row-level validation (`ingest`)

pub mod ingest;

pub use ingest::*;
