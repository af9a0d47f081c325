//! Fundamental data types: genomic coordinates and sequences.

pub mod coords;
pub mod sequence;
pub mod typedef;
