//! Analytical tools: coverage analysis and redundancy elimination.

pub mod coverage;
pub mod eliminate;
