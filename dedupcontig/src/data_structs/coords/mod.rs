//! Genomic coordinate primitives.
//!
//! - [`Interval`]: a half-open region `[start, end)` on a named contig.
//! - [`IntervalSet`]: a per-contig collection of sorted, non-overlapping
//!   intervals with merge, subtraction and overlap queries.

mod interval;
mod interval_set;

pub use interval::Interval;
pub use interval_set::IntervalSet;
