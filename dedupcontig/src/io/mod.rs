//! File input and output: FASTA text and the aligner collaborator.

pub mod blast;
pub mod fasta;
