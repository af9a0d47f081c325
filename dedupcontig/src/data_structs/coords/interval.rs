use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::data_structs::typedef::{PosType, SeqName};
use crate::error::{Error, Result};

/// A half-open genomic region `[start, end)` on a named contig.
///
/// Intervals are immutable value objects. The region with `start == end`
/// is the designated *void* interval: it carries no contig id and behaves
/// as the neutral element of every operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    seqname: SeqName,
    start:   PosType,
    end:     PosType,
}

impl Interval {
    /// Creates a new `Interval`.
    ///
    /// Fails with [`Error::MalformedInterval`] if `start > end`. Equal
    /// bounds collapse to the void interval.
    pub fn new(
        seqname: impl Into<SeqName>,
        start: PosType,
        end: PosType,
    ) -> Result<Self> {
        let seqname = seqname.into();
        if start > end {
            return Err(Error::MalformedInterval {
                seqname,
                start,
                end,
            });
        }
        if start == end {
            return Ok(Self::void());
        }
        Ok(Self {
            seqname,
            start,
            end,
        })
    }

    /// Internal constructor for callers that already hold `start <= end`.
    pub(crate) fn new_unchecked(
        seqname: SeqName,
        start: PosType,
        end: PosType,
    ) -> Self {
        debug_assert!(start <= end);
        Self {
            seqname,
            start,
            end,
        }
    }

    /// Returns the canonical void (empty) interval.
    pub fn void() -> Self {
        Self {
            seqname: SeqName::default(),
            start:   0,
            end:     0,
        }
    }

    pub fn is_void(&self) -> bool {
        self.start == self.end
    }

    pub fn seqname(&self) -> &SeqName {
        &self.seqname
    }

    pub fn start(&self) -> PosType {
        self.start
    }

    pub fn end(&self) -> PosType {
        self.end
    }

    pub fn length(&self) -> PosType {
        self.end - self.start
    }

    /// True iff both intervals share a contig and their regions intersect.
    /// Touching intervals (`self.end == other.start`) do not overlap.
    pub fn overlaps(
        &self,
        other: &Self,
    ) -> bool {
        !self.is_void()
            && !other.is_void()
            && self.seqname == other.seqname
            && self.start.max(other.start) < self.end.min(other.end)
    }

    /// Length of the intersection, 0 for void, foreign or disjoint operands.
    pub fn overlap_len(
        &self,
        other: &Self,
    ) -> PosType {
        if self.overlaps(other) {
            self.end.min(other.end) - self.start.max(other.start)
        }
        else {
            0
        }
    }

    /// Merges two intervals into their covering span when they overlap,
    /// otherwise returns both unchanged, ordered by start.
    ///
    /// Adjacency alone is not sufficient to merge: `[1, 5)` and `[5, 9)`
    /// stay separate. Void operands vanish from the result.
    pub fn union(
        &self,
        other: &Self,
    ) -> Vec<Self> {
        if self.is_void() && other.is_void() {
            return vec![];
        }
        if self.is_void() {
            return vec![other.clone()];
        }
        if other.is_void() {
            return vec![self.clone()];
        }
        if self.overlaps(other) {
            vec![Self {
                seqname: self.seqname.clone(),
                start:   self.start.min(other.start),
                end:     self.end.max(other.end),
            }]
        }
        else if self.start <= other.start {
            vec![self.clone(), other.clone()]
        }
        else {
            vec![other.clone(), self.clone()]
        }
    }

    /// Half-open difference `self \ other`: zero fragments when `other`
    /// covers `self`, one or two otherwise, `self` unchanged when the
    /// operands are disjoint or `other` is void.
    pub fn subtract(
        &self,
        other: &Self,
    ) -> Vec<Self> {
        if self.is_void() {
            return vec![];
        }
        if !self.overlaps(other) {
            return vec![self.clone()];
        }
        let mut fragments = Vec::with_capacity(2);
        if other.start > self.start {
            fragments.push(Self {
                seqname: self.seqname.clone(),
                start:   self.start,
                end:     other.start,
            });
        }
        if other.end < self.end {
            fragments.push(Self {
                seqname: self.seqname.clone(),
                start:   other.end,
                end:     self.end,
            });
        }
        fragments
    }
}

impl Display for Interval {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        if self.is_void() {
            write!(f, "void")
        }
        else {
            write!(f, "{}:{}-{}", self.seqname, self.start, self.end)
        }
    }
}
