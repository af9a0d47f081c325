//! # dedupcontig
//!
//! `dedupcontig` identifies and removes contigs of a draft genome assembly
//! that are already represented, above a coverage threshold, by the other
//! contigs of the same assembly, yielding a non-redundant contig set.
//!
//! The crate is built around an interval-set algebra over half-open genomic
//! coordinates ([`Interval`], [`IntervalSet`]): merging, subtraction and
//! overlap queries that always preserve a sorted, non-overlapping
//! representation per contig. On top of it, [`CoverageAnalyzer`] turns raw
//! self-alignment hits into per-contig coverage interval sets, and
//! [`RedundancyEliminator`] runs the greedy loop that repeatedly removes
//! the most-covered contig and recomputes coverage for the remainder.
//!
//! Sequence alignment itself is delegated to an external `blastn` process
//! ([`BlastnRunner`]); the crate only invokes it and parses its tabular
//! output under a pinned column contract.
//!
//! The number of worker threads used for per-round coverage computation can
//! be configured with the `DEDUP_NUM_THREADS` environment variable.
//!
//! ## Structure
//!
//! * [`data_structs`]: coordinate primitives ([`Interval`], [`IntervalSet`])
//!   and sequence types ([`Sequence`], [`SequenceCollection`]).
//! * [`io`]: FASTA reading/writing and the `blastn` collaborator.
//! * [`tools`]: coverage analysis and the elimination loop.
//! * [`utils`]: the shared rayon thread pool.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use dedupcontig::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let draft_path = Path::new("draft.fasta");
//!     let draft = read_fasta_path(draft_path)?;
//!
//!     let hits = BlastnRunner::default().run(draft_path, draft_path)?;
//!     let analyzer = CoverageAnalyzer::new(&draft, &hits)?;
//!     let outcome = RedundancyEliminator::default().run(&analyzer)?;
//!
//!     let (kept, removed) = outcome.partition(&draft);
//!     write_fasta_path("draft.NR.fasta", &kept)?;
//!     if !removed.is_empty() {
//!         write_fasta_path("draft.RM.fasta", &removed)?;
//!     }
//!     for removal in outcome.removals() {
//!         println!("{}\t{:.2}", removal.id, removal.coverage);
//!     }
//!     Ok(())
//! }
//! ```

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

#[allow(unused_imports)]
use prelude::*;
