//! Commonly used items, re-exported for convenience.

pub use crate::data_structs::coords::{Interval, IntervalSet};
pub use crate::data_structs::sequence::{Sequence, SequenceCollection};
pub use crate::data_structs::typedef::{PosType, SeqName};
pub use crate::error::{Error, Result};
pub use crate::io::blast::{BlastHit, BlastnRunner};
pub use crate::io::fasta::{read_fasta, read_fasta_path, write_fasta, write_fasta_path};
pub use crate::tools::coverage::{non_ambiguous_regions, CoverageAnalyzer};
pub use crate::tools::eliminate::{
    Elimination,
    RedundancyEliminator,
    Removal,
    DEFAULT_THRESHOLD,
};
