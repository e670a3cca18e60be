use crate::reports;
use binscore::config::ScoringConfig;
use binscore::diagnostics::{DiagnosticSink, NullSink, TracingSink};
use binscore::distribution::Histogram;
use binscore::error::{BinScoreError, BsResult};
use binscore::scorer::loader::load_histogram_from_file;
use binscore::scorer::{score_all, Gini, KullbackLeibler};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn_span};

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub config: ScoringConfig,

    /// Reference distribution (CSV)
    #[arg(short, long)]
    pub reference: PathBuf,

    /// Candidate distributions (CSV)
    #[arg(required = true, num_args = 1..)]
    pub candidates: Vec<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &BatchArgs, config: &ScoringConfig) -> BsResult<()> {
    let reference = load_histogram_from_file(&args.reference)?;

    let candidates = args
        .candidates
        .iter()
        .map(|p| Ok((p.display().to_string(), load_histogram_from_file(p)?)))
        .collect::<BsResult<Vec<(String, Histogram)>>>()?;

    info!("🔥 Scoring {} candidates", candidates.len());

    // Faults come back on each entry and are logged below, in candidate order.
    let kl = KullbackLeibler::from_config(config, NullSink);
    let gini = Gini::from_config(config, NullSink);

    let results = score_all(&reference, &candidates, config.offset, &kl, &gini);

    for entry in results.iter().filter_map(|(_, r)| r.as_ref().ok()) {
        let _span = warn_span!("candidate", name = %entry.name).entered();
        for fault in &entry.faults {
            TracingSink.report(fault);
        }
    }

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();

    if args.json {
        let entries = results
            .into_iter()
            .map(|(name, r)| reports::BatchReportEntry::from_result(name, r))
            .collect();
        reports::print_json(&reports::BatchReport { entries })?;
    } else {
        let rows: Vec<_> = results
            .iter()
            .map(|(name, r)| {
                let scores = r
                    .as_ref()
                    .map(|e| (e.divergence, e.separation))
                    .map_err(|e| e.to_string());
                (name.clone(), scores)
            })
            .collect();
        reports::print_score_table(&rows);
        reports::print_fault_table(
            results
                .iter()
                .filter_map(|(_, r)| r.as_ref().ok())
                .flat_map(|e| e.faults.iter().map(move |f| (e.name.as_str(), f))),
        );
    }

    if failed > 0 {
        return Err(BinScoreError::Validation(format!(
            "{} of {} candidates could not be scored",
            failed,
            args.candidates.len()
        )));
    }
    Ok(())
}
