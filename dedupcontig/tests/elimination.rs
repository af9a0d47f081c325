//! End-to-end elimination scenarios on synthetic assemblies.

use dedupcontig::prelude::*;

fn hit(
    q: &str,
    s: &str,
    qstart: PosType,
    qend: PosType,
) -> BlastHit {
    BlastHit {
        qseqid:   q.into(),
        sseqid:   s.into(),
        pident:   99.0,
        length:   qend - qstart + 1,
        mismatch: 0,
        gapopen:  0,
        qstart,
        qend,
        sstart:   1,
        send:     qend - qstart + 1,
        evalue:   0.0,
        bitscore: 100.0,
    }
}

fn contig(
    id: &str,
    len: usize,
) -> Sequence {
    Sequence::new(id, None, "ACGT".repeat(len / 4 + 1)[..len].to_string())
}

/// C's span is exactly covered, gap-free, by hits from A and B; neither A
/// nor B is covered enough to go. At threshold 85, only C is removed.
#[test]
fn test_fully_covered_contig_is_removed() {
    let draft: SequenceCollection =
        vec![contig("A", 200), contig("B", 200), contig("C", 100)]
            .into_iter()
            .collect();
    let hits = vec![
        // C covered by A over [1, 61) and by B over [50, 101).
        hit("C", "A", 1, 60),
        hit("C", "B", 50, 100),
        // Reciprocal rows of the self-vs-self search.
        hit("A", "C", 1, 60),
        hit("B", "C", 90, 140),
    ];

    let analyzer = CoverageAnalyzer::new(&draft, &hits).unwrap();
    let outcome = RedundancyEliminator::new(85.0).run(&analyzer).unwrap();

    assert_eq!(outcome.n_removed(), 1);
    let removal = &outcome.removals()[0];
    assert_eq!(removal.id, "C");
    assert_eq!(removal.index, 2);
    assert!((removal.coverage - 100.0).abs() < 1e-9);

    let (kept, removed) = outcome.partition(&draft);
    assert_eq!(
        kept.ids().map(|id| id.as_str()).collect::<Vec<_>>(),
        vec!["A", "B"]
    );
    assert_eq!(
        removed.ids().map(|id| id.as_str()).collect::<Vec<_>>(),
        vec!["C"]
    );
}

/// A single contig has no peers to cover it: zero removals.
#[test]
fn test_single_contig_is_kept() {
    let draft: SequenceCollection =
        vec![contig("lonely", 500)].into_iter().collect();
    let analyzer = CoverageAnalyzer::new(&draft, &[]).unwrap();
    let outcome = RedundancyEliminator::default().run(&analyzer).unwrap();

    assert_eq!(outcome.n_removed(), 0);
    assert_eq!(outcome.kept(), &[0]);
    let (kept, removed) = outcome.partition(&draft);
    assert_eq!(kept.len(), 1);
    assert!(removed.is_empty());
}

/// Two contigs that fully cover each other: the loop must remove only the
/// first (stable argmax on the tie) and then find the survivor uncovered.
/// A one-shot filter on initial percentages would wrongly drop both.
#[test]
fn test_mutual_coverage_removes_only_first() {
    let draft: SequenceCollection =
        vec![contig("X", 100), contig("Y", 100)].into_iter().collect();
    let hits = vec![hit("X", "Y", 1, 100), hit("Y", "X", 1, 100)];

    let analyzer = CoverageAnalyzer::new(&draft, &hits).unwrap();
    let outcome = RedundancyEliminator::new(85.0).run(&analyzer).unwrap();

    assert_eq!(outcome.n_removed(), 1);
    assert_eq!(outcome.removals()[0].id, "X");
    assert_eq!(outcome.kept(), &[1]);
}

/// Removal order is greedy on the per-round maximum, and earlier removals
/// change later percentages.
#[test]
fn test_removal_log_is_in_greedy_order() {
    let draft: SequenceCollection = vec![
        contig("A", 1000),
        contig("B", 100),
        contig("C", 100),
    ]
    .into_iter()
    .collect();
    let hits = vec![
        // B fully covered by A; C covered by A at 90%.
        hit("B", "A", 1, 100),
        hit("C", "A", 1, 90),
        // A barely covered by either.
        hit("A", "B", 1, 100),
        hit("A", "C", 101, 190),
    ];

    let analyzer = CoverageAnalyzer::new(&draft, &hits).unwrap();
    let outcome = RedundancyEliminator::new(85.0).run(&analyzer).unwrap();

    let removed_ids: Vec<&str> = outcome
        .removals()
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(removed_ids, vec!["B", "C"]);
    assert!(outcome.removals()[0].coverage > outcome.removals()[1].coverage);
    assert_eq!(outcome.kept(), &[0]);
}

/// Below-threshold coverage never triggers a removal.
#[test]
fn test_threshold_is_respected() {
    let draft: SequenceCollection =
        vec![contig("A", 200), contig("B", 100)].into_iter().collect();
    // B covered at exactly 80%.
    let hits = vec![hit("B", "A", 1, 80), hit("A", "B", 1, 80)];

    let analyzer = CoverageAnalyzer::new(&draft, &hits).unwrap();
    assert_eq!(
        RedundancyEliminator::new(85.0)
            .run(&analyzer)
            .unwrap()
            .n_removed(),
        0
    );
    // Lowering the threshold below 80 removes B.
    let outcome = RedundancyEliminator::new(75.0).run(&analyzer).unwrap();
    assert_eq!(outcome.n_removed(), 1);
    assert_eq!(outcome.removals()[0].id, "B");
}
