//! Shared building blocks for the directory crates: logging setup,
//! response types and process-wide metrics.

pub mod types;
pub mod utils;
pub mod metrics;
