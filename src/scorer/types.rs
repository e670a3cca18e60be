use crate::diagnostics::{BinFault, FaultKind, ScorerKind};
use crate::distribution::BinnedDistribution;
use serde::{Deserialize, Serialize};

/// Aggregate score over the selected bin range.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub value: f64,
    pub std_dev: f64,

    // Bin accounting
    pub bins_used: usize,
    pub bins_skipped: usize,
    pub bins_faulted: usize,
}

impl ScoreResult {
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    pub fn bins_requested(&self) -> usize {
        self.bins_used + self.bins_skipped + self.bins_faulted
    }
}

/// The four numbers a scorer reads for one bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinSample {
    pub bin_index: usize,
    /// Candidate content.
    pub p: f64,
    /// Reference content.
    pub q: f64,
    pub w_p: f64,
    pub w_q: f64,
}

impl BinSample {
    pub fn read<R, C>(bin_index: usize, reference: &R, candidate: &C) -> Self
    where
        R: BinnedDistribution + ?Sized,
        C: BinnedDistribution + ?Sized,
    {
        Self {
            bin_index,
            p: candidate.content(bin_index),
            q: reference.content(bin_index),
            w_p: candidate.error(bin_index),
            w_q: reference.error(bin_index),
        }
    }

    /// Both contents indistinguishable from zero at `zero_epsilon`.
    /// The bound is inclusive, so an epsilon of zero still skips exact zeros.
    #[inline(always)]
    pub fn is_empty(&self, zero_epsilon: f64) -> bool {
        self.p.abs() <= zero_epsilon && self.q.abs() <= zero_epsilon
    }

    pub fn fault(&self, scorer: ScorerKind, kind: FaultKind) -> BinFault {
        BinFault {
            scorer,
            kind,
            bin_index: self.bin_index,
            p: self.p,
            q: self.q,
            w_p: self.w_p,
            w_q: self.w_q,
        }
    }
}

/// Clamps a skip threshold into `0..=f64::MAX`; NaN becomes zero.
pub fn clamp_zero_epsilon(zero_epsilon: f64) -> f64 {
    zero_epsilon.max(0.0).min(f64::MAX)
}

/// What one bin adds to a score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinOutcome {
    Contribution { value: f64, variance: f64 },
    Fault(FaultKind),
}

impl BinOutcome {
    /// Wraps a computed pair, demoting it to a fault if either term is not finite.
    pub fn contribution(value: f64, variance: f64) -> Self {
        if value.is_finite() && variance.is_finite() {
            BinOutcome::Contribution { value, variance }
        } else {
            BinOutcome::Fault(FaultKind::FloatingPointFault)
        }
    }
}
