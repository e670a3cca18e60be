use super::types::{clamp_zero_epsilon, BinOutcome, BinSample, ScoreResult};
use crate::diagnostics::{DiagnosticSink, ScorerKind};
use crate::distribution::BinnedDistribution;
use crate::error::{BinScoreError, BsResult};
use tracing::debug;

/// Per-bin formula plugged into [`walk_bins`].
pub trait Criterion {
    fn kind(&self) -> ScorerKind;
    fn evaluate(&self, sample: &BinSample) -> BinOutcome;
}

/// Rejects mismatched bin counts and offsets outside `0..bin_count`.
pub fn check_inputs<R, C>(reference: &R, candidate: &C, offset: usize) -> BsResult<usize>
where
    R: BinnedDistribution + ?Sized,
    C: BinnedDistribution + ?Sized,
{
    let n = reference.bin_count();
    if n != candidate.bin_count() {
        return Err(BinScoreError::BinCountMismatch {
            reference: n,
            candidate: candidate.bin_count(),
        });
    }
    if offset >= n {
        return Err(BinScoreError::OffsetOutOfRange {
            offset,
            bin_count: n,
        });
    }
    Ok(n)
}

#[derive(Default)]
struct Accumulator {
    value: f64,
    variance: f64,
    used: usize,
    skipped: usize,
    faulted: usize,
}

impl Accumulator {
    fn finish(self) -> ScoreResult {
        ScoreResult {
            value: self.value,
            std_dev: self.variance.sqrt(),
            bins_used: self.used,
            bins_skipped: self.skipped,
            bins_faulted: self.faulted,
        }
    }
}

/// Walks bins `offset+1..=N`, summing each bin's value and variance.
///
/// Bins whose contents are both at or below `zero_epsilon` are skipped. Bins the
/// criterion cannot evaluate are reported to `sink` and left out of both sums;
/// they never fail the call.
pub fn walk_bins<R, C, S, K>(
    reference: &R,
    candidate: &C,
    offset: usize,
    zero_epsilon: f64,
    sink: &S,
    criterion: &K,
) -> BsResult<ScoreResult>
where
    R: BinnedDistribution + ?Sized,
    C: BinnedDistribution + ?Sized,
    S: DiagnosticSink + ?Sized,
    K: Criterion + ?Sized,
{
    let n = check_inputs(reference, candidate, offset)?;
    let zero_epsilon = clamp_zero_epsilon(zero_epsilon);
    let mut acc = Accumulator::default();

    for bin in (offset + 1)..=n {
        let sample = BinSample::read(bin, reference, candidate);

        if sample.is_empty(zero_epsilon) {
            acc.skipped += 1;
            continue;
        }

        match criterion.evaluate(&sample) {
            BinOutcome::Contribution { value, variance } => {
                acc.value += value;
                acc.variance += variance;
                acc.used += 1;
            }
            BinOutcome::Fault(kind) => {
                sink.report(&sample.fault(criterion.kind(), kind));
                acc.faulted += 1;
            }
        }
    }

    let result = acc.finish();
    debug!(
        scorer = %criterion.kind(),
        value = result.value,
        std_dev = result.std_dev,
        used = result.bins_used,
        skipped = result.bins_skipped,
        faulted = result.bins_faulted,
        "score computed"
    );
    Ok(result)
}
