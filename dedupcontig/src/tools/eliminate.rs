//! The greedy redundancy elimination loop.
//!
//! Each round removes the single most-covered contig at or above the
//! threshold, then recomputes every remaining contig's coverage from
//! scratch. The recomputation is load-bearing: removing the most-covered
//! contig first can lower the coverage of others, so a one-shot filter on
//! initial percentages is not equivalent and rounds must stay sequential.
//! Within one round, per-contig percentages are pure reads of the coverage
//! matrix and are computed in parallel.

use hashbrown::HashSet;
use log::{debug, info};
use rayon::prelude::*;

use crate::data_structs::sequence::SequenceCollection;
use crate::data_structs::typedef::SeqName;
use crate::error::Result;
use crate::tools::coverage::CoverageAnalyzer;
use crate::utils::THREAD_POOL;

/// The threshold the original pipeline executes. Its documentation claims
/// 95, but the running constant has always been 85.
pub const DEFAULT_THRESHOLD: f64 = 85.0;

/// One entry of the removal log.
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    pub index:    usize,
    pub id:       SeqName,
    /// Coverage percent at the moment of removal.
    pub coverage: f64,
}

/// Result of an elimination run: the ordered removal log and the kept
/// indices, both over the original collection order.
#[derive(Debug, Clone, Default)]
pub struct Elimination {
    removals: Vec<Removal>,
    kept:     Vec<usize>,
}

impl Elimination {
    /// Removal log in removal order.
    pub fn removals(&self) -> &[Removal] {
        &self.removals
    }

    /// Indices of surviving contigs, in original order.
    pub fn kept(&self) -> &[usize] {
        &self.kept
    }

    pub fn n_removed(&self) -> usize {
        self.removals.len()
    }

    /// Splits a collection into (kept, removed), both in original order.
    pub fn partition(
        &self,
        collection: &SequenceCollection,
    ) -> (SequenceCollection, SequenceCollection) {
        let removed_set: HashSet<usize> =
            self.removals.iter().map(|r| r.index).collect();
        let (removed, kept): (Vec<_>, Vec<_>) = collection
            .sequences()
            .iter()
            .enumerate()
            .partition(|(i, _)| removed_set.contains(i));
        (
            kept.into_iter().map(|(_, seq)| seq.clone()).collect(),
            removed.into_iter().map(|(_, seq)| seq.clone()).collect(),
        )
    }
}

/// Greedy eliminator of contigs covered above a threshold by their peers.
#[derive(Debug, Clone)]
pub struct RedundancyEliminator {
    threshold: f64,
}

impl Default for RedundancyEliminator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl RedundancyEliminator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Runs the elimination loop to completion.
    ///
    /// Any coverage computation failure aborts the whole run; a partial
    /// redundancy determination is not meaningful.
    pub fn run(
        &self,
        analyzer: &CoverageAnalyzer,
    ) -> Result<Elimination> {
        let n = analyzer.n_contigs();
        let mut removed: HashSet<usize> = HashSet::new();
        let mut removals = Vec::new();

        let mut coverage = compute_round(analyzer, &removed)?;
        while let Some((index, percent)) = stable_argmax(&coverage, &removed) {
            if percent < self.threshold {
                break;
            }
            info!(
                "Removing contig {} ({:.2}% covered)",
                analyzer.ids()[index],
                percent
            );
            removals.push(Removal {
                index,
                id: analyzer.ids()[index].clone(),
                coverage: percent,
            });
            removed.insert(index);
            coverage = compute_round(analyzer, &removed)?;
        }

        let kept = (0..n).filter(|i| !removed.contains(i)).collect();
        debug!(
            "Elimination finished: {} removed, {} kept",
            removals.len(),
            n - removals.len()
        );
        Ok(Elimination { removals, kept })
    }
}

/// Coverage percent of every non-removed contig, computed from scratch.
/// Removed slots carry 0 and are never consulted by the argmax.
fn compute_round(
    analyzer: &CoverageAnalyzer,
    removed: &HashSet<usize>,
) -> Result<Vec<f64>> {
    THREAD_POOL.install(|| {
        (0..analyzer.n_contigs())
            .into_par_iter()
            .map(|i| {
                if removed.contains(&i) {
                    Ok(0.0)
                }
                else {
                    analyzer.coverage_percent(i, removed)
                }
            })
            .collect()
    })
}

/// Stable argmax over non-removed contigs: on ties the lowest index wins.
fn stable_argmax(
    coverage: &[f64],
    removed: &HashSet<usize>,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &percent) in coverage.iter().enumerate() {
        if removed.contains(&i) {
            continue;
        }
        match best {
            Some((_, max)) if percent <= max => {},
            _ => best = Some((i, percent)),
        }
    }
    best
}
