//! Coverage analysis: which portions of each contig are aligned by which
//! other contigs.

use hashbrown::{HashMap, HashSet};
use log::debug;

use crate::data_structs::coords::{Interval, IntervalSet};
use crate::data_structs::sequence::SequenceCollection;
use crate::data_structs::typedef::{PosType, SeqName};
use crate::error::{Error, Result};
use crate::io::blast::BlastHit;

/// The valid, comparable positions of a contig: its full span `[1, len + 1)`
/// minus every maximal run of the ambiguous base (`N`/`n`).
pub fn non_ambiguous_regions(
    seqname: &SeqName,
    seq: &str,
) -> Result<IntervalSet> {
    let bytes = seq.as_bytes();
    let mut regions = IntervalSet::from(Interval::new(
        seqname.clone(),
        1,
        bytes.len() as PosType + 1,
    )?);

    let mut run_start: Option<usize> = None;
    for (pos, byte) in bytes.iter().enumerate() {
        let ambiguous = matches!(byte, b'N' | b'n');
        match (ambiguous, run_start) {
            (true, None) => run_start = Some(pos),
            (false, Some(start)) => {
                regions.subtract(&Interval::new(
                    seqname.clone(),
                    start as PosType + 1,
                    pos as PosType + 1,
                )?);
                run_start = None;
            },
            _ => {},
        }
    }
    if let Some(start) = run_start {
        regions.subtract(&Interval::new(
            seqname.clone(),
            start as PosType + 1,
            bytes.len() as PosType + 1,
        )?);
    }
    Ok(regions)
}

/// Per-assembly coverage state: each contig's non-ambiguous regions and an
/// n×n matrix of interval sets, where `matrix[i][j]` holds the portions of
/// contig `i` covered by alignments against contig `j`.
///
/// Built once per run; afterwards read-only.
#[derive(Debug, Clone)]
pub struct CoverageAnalyzer {
    ids:           Vec<SeqName>,
    non_ambiguous: Vec<IntervalSet>,
    matrix:        Vec<Vec<IntervalSet>>,
}

impl CoverageAnalyzer {
    /// Builds non-ambiguous sets and the coverage matrix from a draft
    /// assembly and its self-alignment hits. Self-hits are discarded;
    /// hits naming a contig absent from the collection fail with
    /// [`Error::MissingIdentifier`].
    pub fn new(
        collection: &SequenceCollection,
        hits: &[BlastHit],
    ) -> Result<Self> {
        let ids: Vec<SeqName> = collection.ids().cloned().collect();
        let mut index: HashMap<SeqName, usize> =
            HashMap::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            // First occurrence wins for duplicate identifiers.
            index.entry(id.clone()).or_insert(i);
        }

        let non_ambiguous = collection
            .sequences()
            .iter()
            .map(|seq| non_ambiguous_regions(seq.id(), seq.seq()))
            .collect::<Result<Vec<_>>>()?;

        let n = ids.len();
        let mut raw: Vec<Vec<Vec<Interval>>> = vec![vec![Vec::new(); n]; n];
        for hit in hits.iter().filter(|hit| !hit.is_self_hit()) {
            let query = *index
                .get(&hit.qseqid)
                .ok_or_else(|| Error::missing_id(hit.qseqid.as_str()))?;
            let subject = *index
                .get(&hit.sseqid)
                .ok_or_else(|| Error::missing_id(hit.sseqid.as_str()))?;
            raw[query][subject].push(hit.query_interval()?);
        }
        let matrix = raw
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.into_iter().collect::<IntervalSet>())
                    .collect()
            })
            .collect();
        debug!(
            "Coverage matrix built for {} contigs from {} hits",
            n,
            hits.len()
        );

        Ok(Self {
            ids,
            non_ambiguous,
            matrix,
        })
    }

    pub fn n_contigs(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[SeqName] {
        &self.ids
    }

    pub fn non_ambiguous(
        &self,
        index: usize,
    ) -> &IntervalSet {
        &self.non_ambiguous[index]
    }

    /// Portions of contig `query` covered by hits against contig `subject`.
    pub fn covered_by(
        &self,
        query: usize,
        subject: usize,
    ) -> &IntervalSet {
        &self.matrix[query][subject]
    }

    /// Percent of contig `index`'s non-ambiguous length covered by the
    /// merged alignments of every contig not in `excluded` (and not
    /// itself). Fails with [`Error::EmptyRegion`] when the contig has no
    /// non-ambiguous positions; the condition is never silently zeroed.
    pub fn coverage_percent(
        &self,
        index: usize,
        excluded: &HashSet<usize>,
    ) -> Result<f64> {
        let union = IntervalSet::from_sets(
            self.matrix[index]
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != index && !excluded.contains(j))
                .map(|(_, cell)| cell),
        );
        self.non_ambiguous[index].overlap_percent(&union)
    }
}
