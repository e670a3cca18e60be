mod common;

use binscore::diagnostics::{CollectingSink, FaultKind, NullSink, ScorerKind};
use binscore::error::BinScoreError;
use binscore::scorer::{self, Gini, KullbackLeibler};
use common::{assert_close, flat_err, hist};

// --- WORKED EXAMPLE: p=10, q=5, w_p=w_q=1 ---

#[test]
fn test_single_bin_divergence() {
    let reference = flat_err(&[5.0], 1.0);
    let candidate = flat_err(&[10.0], 1.0);

    let r = KullbackLeibler::new(NullSink)
        .divergence(&reference, &candidate, 0)
        .unwrap();

    assert_close(r.value, 1.931_471_805_599_453, 1e-12);
    assert_close(r.variance(), 6.866_747_375_038_092, 1e-9);
    assert_close(r.std_dev, 2.620_447_934_044_501, 1e-9);
    assert_eq!(r.bins_used, 1);
}

#[test]
fn test_single_bin_separation() {
    let reference = flat_err(&[5.0], 1.0);
    let candidate = flat_err(&[10.0], 1.0);

    let r = Gini::new(NullSink)
        .separation(&reference, &candidate, 0)
        .unwrap();

    assert_close(r.value, 2.581_988_897_471_611, 1e-12);
    assert_close(r.variance(), 500.0 / 13_500.0, 1e-12);
    assert_close(r.std_dev, 0.192_450_089_729_875_26, 1e-12);
}

// --- AGGREGATION ---

#[test]
fn test_identical_distributions_have_zero_divergence() {
    let h = hist(&[3.0, 10.0, 0.25, 1e4], &[1.0, 2.0, 0.5, 100.0]);
    let r = scorer::divergence(&h, &h, 0).unwrap();
    assert_eq!(r.value, 0.0);
    assert!(r.std_dev > 0.0);
}

#[test]
fn test_multi_bin_sums_per_bin_terms() {
    let reference = flat_err(&[5.0, 5.0], 1.0);
    let candidate = flat_err(&[10.0, 5.0], 1.0);
    let kl = KullbackLeibler::new(NullSink);

    let both = kl.divergence(&reference, &candidate, 0).unwrap();
    let first = kl
        .divergence(&flat_err(&[5.0], 1.0), &flat_err(&[10.0], 1.0), 0)
        .unwrap();

    // Second bin has p == q: no value, variance w_p^2 + w_q^2
    assert_close(both.value, first.value, 1e-12);
    assert_close(both.variance(), first.variance() + 2.0, 1e-9);
}

// --- EMPTY-BIN SKIP ---

#[test]
fn test_empty_bins_are_skipped_by_both_scorers() {
    let reference = flat_err(&[5.0, 0.0, 4e-7], 1.0);
    let candidate = flat_err(&[10.0, 0.0, 1e-7], 1.0);
    let sink = CollectingSink::new();

    let kl = KullbackLeibler::new(&sink)
        .divergence(&reference, &candidate, 0)
        .unwrap();
    let gini = Gini::new(&sink)
        .separation(&reference, &candidate, 0)
        .unwrap();

    assert_eq!(kl.bins_skipped, 2);
    assert_eq!(gini.bins_skipped, 2);
    assert_close(kl.value, 1.931_471_805_599_453, 1e-12);
    assert_close(gini.value, 2.581_988_897_471_611, 1e-12);
    assert!(sink.is_empty());
}

#[test]
fn test_zero_epsilon_is_configurable() {
    let reference = flat_err(&[5.0, 0.01], 1.0);
    let candidate = flat_err(&[10.0, 0.02], 1.0);

    let default = Gini::new(NullSink)
        .separation(&reference, &candidate, 0)
        .unwrap();
    let coarse = Gini::new(NullSink)
        .with_zero_epsilon(0.05)
        .separation(&reference, &candidate, 0)
        .unwrap();

    assert_eq!(default.bins_used, 2);
    assert_eq!(coarse.bins_used, 1);
    assert_eq!(coarse.bins_skipped, 1);
}

// --- OFFSET ---

#[test]
fn test_offset_matches_manual_suffix() {
    let reference = hist(&[100.0, 4.0, 9.0, 2.0], &[10.0, 2.0, 3.0, 1.0]);
    let candidate = hist(&[0.0, 6.0, 8.0, 2.5], &[0.0, 1.5, 2.0, 1.0]);

    let kl = KullbackLeibler::new(NullSink);
    let gini = Gini::new(NullSink);

    for k in 0..4 {
        let ref_tail = reference.slice_from(k).unwrap();
        let cand_tail = candidate.slice_from(k).unwrap();

        assert_eq!(
            kl.divergence(&reference, &candidate, k).unwrap(),
            kl.divergence(&ref_tail, &cand_tail, 0).unwrap()
        );
        assert_eq!(
            gini.separation(&reference, &candidate, k).unwrap(),
            gini.separation(&ref_tail, &cand_tail, 0).unwrap()
        );
    }
}

// --- FAULTS ---

#[test]
fn test_empty_reference_bin_is_reported_and_excluded() {
    let reference = flat_err(&[5.0, 0.0, 5.0], 1.0);
    let candidate = flat_err(&[10.0, 3.0, 5.0], 1.0);
    let sink = CollectingSink::new();

    let r = KullbackLeibler::new(&sink)
        .divergence(&reference, &candidate, 0)
        .unwrap();

    assert_close(r.value, 1.931_471_805_599_453, 1e-12);
    assert_eq!(r.bins_faulted, 1);
    assert_eq!(r.bins_used, 2);

    let faults = sink.faults();
    assert_eq!(faults.len(), 1);
    let f = &faults[0];
    assert_eq!(f.scorer, ScorerKind::KullbackLeibler);
    assert_eq!(f.kind, FaultKind::DivideByZero);
    assert_eq!(f.bin_index, 2);
    assert_eq!((f.p, f.q, f.w_p, f.w_q), (3.0, 0.0, 1.0, 1.0));
}

#[test]
fn test_empty_candidate_bin_faults_divergence_only() {
    let reference = flat_err(&[5.0, 3.0], 1.0);
    let candidate = flat_err(&[10.0, 0.0], 1.0);
    let sink = CollectingSink::new();

    let kl = KullbackLeibler::new(&sink)
        .divergence(&reference, &candidate, 0)
        .unwrap();
    let gini = Gini::new(&sink)
        .separation(&reference, &candidate, 0)
        .unwrap();

    assert_eq!(kl.bins_faulted, 1);
    assert_eq!(gini.bins_faulted, 0);
    assert_eq!(gini.bins_used, 2);
    assert_eq!(sink.faults()[0].kind, FaultKind::FloatingPointFault);
}

#[test]
fn test_zero_epsilon_still_skips_exact_zeros() {
    let reference = flat_err(&[5.0, 0.0, 0.0], 1.0);
    let candidate = flat_err(&[10.0, 0.0, 1e-300], 1.0);
    let sink = CollectingSink::new();

    let r = Gini::new(&sink)
        .with_zero_epsilon(0.0)
        .separation(&reference, &candidate, 0)
        .unwrap();

    assert_eq!(r.bins_skipped, 1);
    assert_eq!(r.bins_used, 1);
    assert_eq!(r.bins_faulted, 1);
    let f = &sink.faults()[0];
    assert_eq!((f.scorer, f.kind, f.bin_index), (ScorerKind::Gini, FaultKind::DivideByZero, 3));
}

#[test]
fn test_unusable_epsilon_is_clamped_to_zero() {
    let reference = flat_err(&[5.0, 0.0, 0.01], 1.0);
    let candidate = flat_err(&[10.0, 0.0, 0.02], 1.0);

    for eps in [f64::NAN, -1.0] {
        let gini = Gini::new(NullSink).with_zero_epsilon(eps);
        assert_eq!(gini.zero_epsilon(), 0.0);

        let r = gini.separation(&reference, &candidate, 0).unwrap();
        assert_eq!(r.bins_skipped, 1);
        assert_eq!(r.bins_used, 2);
        assert_eq!(KullbackLeibler::new(NullSink).with_zero_epsilon(eps).zero_epsilon(), 0.0);
    }
}

// --- PRECONDITIONS ---

#[test]
fn test_bin_count_mismatch_is_rejected() {
    let reference = flat_err(&[1.0, 2.0], 1.0);
    let candidate = flat_err(&[1.0, 2.0, 3.0], 1.0);
    let sink = CollectingSink::new();

    let err = KullbackLeibler::new(&sink)
        .divergence(&reference, &candidate, 0)
        .unwrap_err();
    assert!(err.is_invalid_input());
    assert!(matches!(
        err,
        BinScoreError::BinCountMismatch {
            reference: 2,
            candidate: 3
        }
    ));

    assert!(Gini::new(&sink)
        .separation(&reference, &candidate, 0)
        .unwrap_err()
        .is_invalid_input());
    assert!(sink.is_empty());
}

#[test]
fn test_offset_at_or_past_bin_count_is_rejected() {
    // q = 0 in every bin: any accumulation would report faults
    let reference = flat_err(&[0.0, 0.0, 0.0], 1.0);
    let candidate = flat_err(&[1.0, 1.0, 1.0], 1.0);
    let sink = CollectingSink::new();
    let kl = KullbackLeibler::new(&sink);
    let gini = Gini::new(&sink);

    for offset in [3, 4, 100] {
        let err = kl.divergence(&reference, &candidate, offset).unwrap_err();
        assert!(matches!(
            err,
            BinScoreError::OffsetOutOfRange { bin_count: 3, .. }
        ));
        assert!(gini
            .separation(&reference, &candidate, offset)
            .unwrap_err()
            .is_invalid_input());
    }
    assert!(sink.is_empty());
}
