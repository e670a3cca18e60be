use super::engine::{walk_bins, Criterion};
use super::types::{clamp_zero_epsilon, BinOutcome, BinSample, ScoreResult};
use crate::config::ScoringConfig;
use crate::consts::DEFAULT_ZERO_EPSILON;
use crate::diagnostics::{DiagnosticSink, FaultKind, ScorerKind, TracingSink};
use crate::distribution::BinnedDistribution;
use crate::error::BsResult;

/// Kullback-Leibler style divergence of a candidate from a reference.
///
/// Each bin contributes `p * ln(p / q) - (p - q)`, which vanishes when the
/// bins agree. The variance is the first-order propagation of the bin errors
/// through that term:
/// `w_p^2 * (1 + ln(p / q))^2 + (p * w_q / q)^2`.
#[derive(Debug, Clone)]
pub struct KullbackLeibler<S = TracingSink> {
    sink: S,
    zero_epsilon: f64,
}

impl Default for KullbackLeibler<TracingSink> {
    fn default() -> Self {
        Self::new(TracingSink)
    }
}

impl<S: DiagnosticSink> KullbackLeibler<S> {
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

    pub fn divergence<R, C>(
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

impl<S> Criterion for KullbackLeibler<S> {
    fn kind(&self) -> ScorerKind {
        ScorerKind::KullbackLeibler
    }

    fn evaluate(&self, s: &BinSample) -> BinOutcome {
        divergence_term(s)
    }
}

pub fn divergence_term(s: &BinSample) -> BinOutcome {
    if s.q == 0.0 {
        return BinOutcome::Fault(FaultKind::DivideByZero);
    }

    let ratio = s.p / s.q;
    if !ratio.is_finite() || ratio <= 0.0 {
        return BinOutcome::Fault(FaultKind::FloatingPointFault);
    }

    let lg = ratio.ln();
    let value = s.p * lg - (s.p - s.q);
    let variance = (s.w_p * (1.0 + lg)).powi(2) + (s.p * s.w_q / s.q).powi(2);

    BinOutcome::contribution(value, variance)
}
