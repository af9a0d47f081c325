use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::Interval;
use crate::data_structs::typedef::{PosType, SeqName};
use crate::error::{Error, Result};

/// An ordered collection of non-overlapping intervals, keyed by contig id.
///
/// The map keeps identifiers in lexicographic order; within each identifier
/// intervals are sorted ascending by start and pairwise non-overlapping.
/// Both properties, together with the cached total length, are restored
/// before any public mutating operation returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalSet {
    inner:        BTreeMap<SeqName, Vec<Interval>>,
    total_length: PosType,
}

/// Minimal non-overlapping cover of a raw interval list, by sort-and-sweep.
///
/// Unlike [`Interval::union`], the sweep coalesces touching intervals:
/// the cover of `[1, 5)` and `[5, 9)` is the single span `[1, 9)`.
fn merge_sweep(mut raw: Vec<Interval>) -> Vec<Interval> {
    raw.sort_by_key(Interval::start);
    let mut merged: Vec<Interval> = Vec::with_capacity(raw.len());
    for interval in raw {
        match merged.last_mut() {
            Some(last) if interval.start() <= last.end() => {
                if interval.end() > last.end() {
                    *last = Interval::new_unchecked(
                        last.seqname().clone(),
                        last.start(),
                        interval.end(),
                    );
                }
            },
            _ => merged.push(interval),
        }
    }
    merged
}

impl IntervalSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from several existing sets, flattening and re-merging.
    pub fn from_sets<'a, I>(sets: I) -> Self
    where
        I: IntoIterator<Item = &'a IntervalSet>, {
        sets.into_iter()
            .flat_map(|set| set.intervals().cloned())
            .collect()
    }

    /// Number of distinct contig identifiers.
    pub fn n_seqnames(&self) -> usize {
        self.inner.len()
    }

    /// Number of stored intervals.
    pub fn n_intervals(&self) -> usize {
        self.inner.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Identifiers in lexicographic order.
    pub fn seqnames(&self) -> impl Iterator<Item = &SeqName> {
        self.inner.keys()
    }

    /// Per-identifier interval slices, identifiers in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&SeqName, &[Interval])> {
        self.inner.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// All stored intervals, ordered by identifier then start.
    pub fn intervals(&self) -> impl Iterator<Item = &Interval> {
        self.inner.values().flatten()
    }

    /// Sum of interval lengths. Cached; recomputed inside every mutation.
    pub fn total_length(&self) -> PosType {
        self.total_length
    }

    /// The sub-collection for one identifier, empty if absent.
    pub fn by_id(
        &self,
        seqname: &str,
    ) -> Self {
        match self.inner.get_key_value(seqname) {
            Some((key, intervals)) => {
                let total_length = intervals.iter().map(Interval::length).sum();
                Self {
                    inner: BTreeMap::from([(key.clone(), intervals.clone())]),
                    total_length,
                }
            },
            None => Self::new(),
        }
    }

    pub fn contains_id(
        &self,
        seqname: &str,
    ) -> bool {
        self.inner.contains_key(seqname)
    }

    /// Inserts one interval, absorbing any stored same-id intervals that
    /// overlap it. Touching intervals are kept separate. Void is a no-op.
    pub fn insert(
        &mut self,
        interval: Interval,
    ) {
        if interval.is_void() {
            return;
        }
        match self.inner.entry(interval.seqname().clone()) {
            Entry::Vacant(entry) => {
                entry.insert(vec![interval]);
            },
            Entry::Occupied(mut entry) => {
                let stored = entry.get_mut();
                let (absorbed, mut retained): (Vec<_>, Vec<_>) = stored
                    .drain(..)
                    .partition(|existing| existing.overlaps(&interval));
                // Every absorbed interval overlaps the original insert, so
                // each union step yields exactly one interval.
                let merged = absorbed
                    .iter()
                    .fold(interval, |acc, existing| {
                        acc.union(existing).swap_remove(0)
                    });
                retained.push(merged);
                retained.sort_by_key(Interval::start);
                *stored = retained;
            },
        }
        self.recompute_length();
    }

    /// Removes one region from every stored interval sharing its id.
    pub fn subtract(
        &mut self,
        interval: &Interval,
    ) {
        if interval.is_void() {
            return;
        }
        let Some(stored) = self.inner.get_mut(interval.seqname()) else {
            return;
        };
        *stored = stored
            .iter()
            .flat_map(|existing| existing.subtract(interval))
            .collect();
        if stored.is_empty() {
            self.inner.remove(interval.seqname());
        }
        self.recompute_length();
    }

    /// Removes every region of `other` from this set.
    pub fn subtract_set(
        &mut self,
        other: &IntervalSet,
    ) {
        for interval in other.intervals().cloned().collect::<Vec<_>>() {
            self.subtract(&interval);
        }
    }

    /// Total intersection length with `other`, summed over shared ids.
    ///
    /// Both operands hold sorted non-overlapping intervals, so a linear
    /// two-pointer scan per shared id is exact.
    pub fn overlap_len(
        &self,
        other: &IntervalSet,
    ) -> PosType {
        let mut total = 0;
        for (seqname, own) in self.inner.iter() {
            let Some(theirs) = other.inner.get(seqname) else {
                continue;
            };
            let (mut i, mut j) = (0, 0);
            while i < own.len() && j < theirs.len() {
                total += own[i].overlap_len(&theirs[j]);
                if own[i].end() <= theirs[j].end() {
                    i += 1;
                }
                else {
                    j += 1;
                }
            }
        }
        total
    }

    /// Intersection length with `other` as a percentage of this set's
    /// total length. Fails with [`Error::EmptyRegion`] on an empty set,
    /// never silently reporting zero.
    pub fn overlap_percent(
        &self,
        other: &IntervalSet,
    ) -> Result<f64> {
        if self.total_length == 0 {
            return Err(Error::EmptyRegion {
                operation: "overlap percent",
            });
        }
        Ok(self.overlap_len(other) as f64 / self.total_length as f64 * 100.0)
    }

    /// Length-weighted mean midpoint of a single-contig set.
    pub fn centroid(&self) -> Result<f64> {
        if self.total_length == 0 {
            return Err(Error::EmptyRegion {
                operation: "centroid",
            });
        }
        if self.n_seqnames() > 1 {
            return Err(Error::MultiContigCenter {
                n_seqnames: self.n_seqnames(),
            });
        }
        let weighted_sum: f64 = self
            .intervals()
            .map(|iv| {
                (iv.start() + iv.end() - 1) as f64 / 2.0 * iv.length() as f64
            })
            .sum();
        Ok(weighted_sum / self.total_length as f64)
    }

    /// Diagnostic check: true if any two stored same-id intervals overlap.
    /// Must never hold once a public operation has returned.
    pub fn has_internal_overlap(&self) -> bool {
        self.inner.values().any(|intervals| {
            intervals.iter().enumerate().any(|(i, a)| {
                intervals[i + 1..].iter().any(|b| a.overlaps(b))
            })
        })
    }

    fn recompute_length(&mut self) {
        self.total_length = self.intervals().map(Interval::length).sum();
    }
}

impl From<Interval> for IntervalSet {
    fn from(interval: Interval) -> Self {
        std::iter::once(interval).collect()
    }
}

impl FromIterator<Interval> for IntervalSet {
    /// Collects raw intervals per id, then merges each id's intervals into
    /// its minimal non-overlapping cover. Void intervals are dropped.
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        let mut inner: BTreeMap<SeqName, Vec<Interval>> = BTreeMap::new();
        for interval in iter.into_iter().filter(|iv| !iv.is_void()) {
            inner
                .entry(interval.seqname().clone())
                .or_default()
                .push(interval);
        }
        for intervals in inner.values_mut() {
            if intervals.len() > 1 {
                *intervals = merge_sweep(std::mem::take(intervals));
            }
        }
        let mut set = Self {
            inner,
            total_length: 0,
        };
        set.recompute_length();
        set
    }
}

impl FromIterator<IntervalSet> for IntervalSet {
    fn from_iter<T: IntoIterator<Item = IntervalSet>>(iter: T) -> Self {
        iter.into_iter()
            .flat_map(|set| set.inner.into_values().flatten())
            .collect()
    }
}

impl Extend<Interval> for IntervalSet {
    fn extend<T: IntoIterator<Item = Interval>>(
        &mut self,
        iter: T,
    ) {
        for interval in iter {
            self.insert(interval);
        }
    }
}

impl Display for IntervalSet {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "void");
        }
        write!(
            f,
            "{}",
            self.intervals().map(|iv| format!("[{}]", iv)).join("\n")
        )
    }
}
