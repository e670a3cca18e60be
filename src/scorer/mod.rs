pub mod batch;
pub mod divergence;
pub mod engine;
pub mod loader;
pub mod separation;
pub mod types;

pub use self::batch::{score_all, BatchEntry};
pub use self::divergence::KullbackLeibler;
pub use self::engine::{check_inputs, walk_bins, Criterion};
pub use self::separation::Gini;
pub use self::types::{clamp_zero_epsilon, BinOutcome, BinSample, ScoreResult};

use crate::diagnostics::TracingSink;
use crate::distribution::BinnedDistribution;
use crate::error::BsResult;

/// Divergence with default settings, faults logged through `tracing`.
pub fn divergence<R, C>(reference: &R, candidate: &C, offset: usize) -> BsResult<ScoreResult>
where
    R: BinnedDistribution + ?Sized,
    C: BinnedDistribution + ?Sized,
{
    KullbackLeibler::new(TracingSink).divergence(reference, candidate, offset)
}

/// Separation with default settings, faults logged through `tracing`.
pub fn separation<R, C>(reference: &R, candidate: &C, offset: usize) -> BsResult<ScoreResult>
where
    R: BinnedDistribution + ?Sized,
    C: BinnedDistribution + ?Sized,
{
    Gini::new(TracingSink).separation(reference, candidate, offset)
}
