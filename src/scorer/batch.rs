use super::divergence::KullbackLeibler;
use super::separation::Gini;
use super::types::ScoreResult;
use crate::diagnostics::{BinFault, CollectingSink, DiagnosticSink, ScorerKind};
use crate::distribution::BinnedDistribution;
use crate::error::BsResult;
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub name: String,
    pub divergence: ScoreResult,
    pub separation: ScoreResult,
    /// Bins this candidate lost to faults, divergence first.
    pub faults: Vec<BinFault>,
}

/// Scores every named candidate against one reference with both scorers.
///
/// Candidates run in parallel. Output order follows `candidates`; a contract
/// violation on one candidate is returned in its slot without touching the
/// others. Each entry carries its own faults, which are also forwarded to
/// the scorers' sinks.
pub fn score_all<R, C, S>(
    reference: &R,
    candidates: &[(String, C)],
    offset: usize,
    kl: &KullbackLeibler<S>,
    gini: &Gini<S>,
) -> Vec<(String, BsResult<BatchEntry>)>
where
    R: BinnedDistribution + Sync + ?Sized,
    C: BinnedDistribution + Sync,
    S: DiagnosticSink + Sync,
{
    candidates
        .par_iter()
        .map(|(name, candidate)| {
            let entry = score_one(name, reference, candidate, offset, kl, gini);
            (name.clone(), entry)
        })
        .collect()
}

fn score_one<R, C, S>(
    name: &str,
    reference: &R,
    candidate: &C,
    offset: usize,
    kl: &KullbackLeibler<S>,
    gini: &Gini<S>,
) -> BsResult<BatchEntry>
where
    R: BinnedDistribution + ?Sized,
    C: BinnedDistribution,
    S: DiagnosticSink,
{
    // Shared sinks interleave candidates, so faults are first kept per candidate.
    let local = CollectingSink::new();
    let scores = KullbackLeibler::new(&local)
        .with_zero_epsilon(kl.zero_epsilon())
        .divergence(reference, candidate, offset)
        .and_then(|divergence| {
            let separation = Gini::new(&local)
                .with_zero_epsilon(gini.zero_epsilon())
                .separation(reference, candidate, offset)?;
            Ok((divergence, separation))
        });

    let faults = local.drain();
    for fault in &faults {
        match fault.scorer {
            ScorerKind::KullbackLeibler => kl.sink().report(fault),
            ScorerKind::Gini => gini.sink().report(fault),
        }
    }

    let (divergence, separation) = scores?;
    Ok(BatchEntry {
        name: name.to_string(),
        divergence,
        separation,
        faults,
    })
}
