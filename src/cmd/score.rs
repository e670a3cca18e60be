use crate::reports;
use binscore::config::ScoringConfig;
use binscore::diagnostics::{CollectingSink, DiagnosticSink, TracingSink};
use binscore::error::BsResult;
use binscore::scorer::loader::load_histogram_from_file;
use binscore::scorer::{Gini, KullbackLeibler};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: ScoringConfig,

    /// Reference distribution (CSV)
    #[arg(short, long)]
    pub reference: PathBuf,

    /// Candidate distribution (CSV)
    #[arg(short, long)]
    pub candidate: PathBuf,

    /// Print JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ScoreArgs, config: &ScoringConfig) -> BsResult<()> {
    let reference = load_histogram_from_file(&args.reference)?;
    let candidate = load_histogram_from_file(&args.candidate)?;

    let sink = CollectingSink::new();
    let kl = KullbackLeibler::from_config(config, &sink);
    let gini = Gini::from_config(config, &sink);

    let divergence = kl.divergence(&reference, &candidate, config.offset)?;
    let separation = gini.separation(&reference, &candidate, config.offset)?;

    let faults = sink.drain();
    for fault in &faults {
        TracingSink.report(fault);
    }

    let name = args.candidate.display().to_string();
    if args.json {
        reports::print_json(&reports::ScoreReport {
            candidate: name,
            divergence,
            separation,
            faults,
        })
    } else {
        reports::print_score_table(&[(name.clone(), Ok((divergence, separation)))]);
        reports::print_fault_table(faults.iter().map(|f| (name.as_str(), f)));
        Ok(())
    }
}
