use arcstr::ArcStr;

/// Contig identifier. Reference-counted so interval sets and coverage
/// matrices can share ids without copying the underlying string.
pub type SeqName = ArcStr;

/// 1-based genomic position. Interval bounds are half-open `[start, end)`.
pub type PosType = u64;
