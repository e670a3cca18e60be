use super::engine::{walk_bins, Criterion};
use super::types::{clamp_zero_epsilon, BinOutcome, BinSample, ScoreResult};
use crate::config::ScoringConfig;
use crate::consts::DEFAULT_ZERO_EPSILON;
use crate::diagnostics::{DiagnosticSink, FaultKind, ScorerKind, TracingSink};
use crate::distribution::BinnedDistribution;
use crate::error::BsResult;

/// Gini style separation of a candidate from a reference.
///
/// Each bin contributes `p / sqrt(p + q)` with variance
/// `((p + 2q) * w_p)^2 / den + (p * w_q)^2 / den`, `den = 4 * (p + q)^3`.
#[derive(Debug, Clone)]
pub struct Gini<S = TracingSink> {
    sink: S,
    zero_epsilon: f64,
}

impl Default for Gini<TracingSink> {
    fn default() -> Self {
        Self::new(TracingSink)
    }
}

impl<S: DiagnosticSink> Gini<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            zero_epsilon: DEFAULT_ZERO_EPSILON,
        }
    }

    pub fn from_config(config: &ScoringConfig, sink: S) -> Self {
        Self::new(sink).with_zero_epsilon(config.zero_epsilon)
    }

    /// Sets the empty-bin threshold. Negative and NaN values are clamped to
    /// zero, which still skips bins whose contents are exactly zero; use
    /// [`ScoringConfig::validate`] to reject them instead.
    pub fn with_zero_epsilon(mut self, zero_epsilon: f64) -> Self {
        self.zero_epsilon = clamp_zero_epsilon(zero_epsilon);
        self
    }

    pub fn zero_epsilon(&self) -> f64 {
        self.zero_epsilon
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn separation<R, C>(
        &self,
        reference: &R,
        candidate: &C,
        offset: usize,
    ) -> BsResult<ScoreResult>
    where
        R: BinnedDistribution + ?Sized,
        C: BinnedDistribution + ?Sized,
    {
        walk_bins(reference, candidate, offset, self.zero_epsilon, &self.sink, self)
    }
}

impl<S> Criterion for Gini<S> {
    fn kind(&self) -> ScorerKind {
        ScorerKind::Gini
    }

    fn evaluate(&self, s: &BinSample) -> BinOutcome {
        separation_term(s)
    }
}

pub fn separation_term(s: &BinSample) -> BinOutcome {
    let sum = s.p + s.q;
    if sum == 0.0 {
        return BinOutcome::Fault(FaultKind::DivideByZero);
    }
    if !sum.is_finite() || sum < 0.0 {
        return BinOutcome::Fault(FaultKind::FloatingPointFault);
    }

    // Cube underflows to zero for tiny sums.
    let den = 4.0 * sum.powi(3);
    if den == 0.0 {
        return BinOutcome::Fault(FaultKind::DivideByZero);
    }

    let value = s.p / sum.sqrt();
    let variance = ((s.p + 2.0 * s.q) * s.w_p).powi(2) / den + (s.p * s.w_q).powi(2) / den;

    BinOutcome::contribution(value, variance)
}
