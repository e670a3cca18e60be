use binscore::config::ScoringConfig;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with scoring settings; explicit flags override it
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one candidate against a reference
    Score(cmd::score::ScoreArgs),
    /// Score several candidates against one reference
    Batch(cmd::batch::BatchArgs),
}

fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(
    path: Option<&str>,
    cli_config: &ScoringConfig,
    sub_matches: Option<&ArgMatches>,
) -> binscore::error::BsResult<ScoringConfig> {
    let Some(path) = path else {
        cli_config.validate()?;
        return Ok(cli_config.clone());
    };

    info!("⚙️  Loading config from: {}", path);
    let mut config = ScoringConfig::load_from_file(path)?;
    if let Some(m) = sub_matches {
        config.merge_from_cli(cli_config, m);
    }
    config.validate()?;
    Ok(config)
}

fn main() {
    // Raw matches tell user-typed flags apart from defaults.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(cli.debug);

    let cli_config = match &cli.command {
        Commands::Score(args) => &args.config,
        Commands::Batch(args) => &args.config,
    };
    let sub_matches = matches.subcommand().map(|(_, m)| m);

    let config = resolve_config(cli.config.as_deref(), cli_config, sub_matches)
        .unwrap_or_else(|e| {
            error!("❌ {}", e);
            process::exit(1);
        });

    let outcome = match cli.command {
        Commands::Score(args) => cmd::score::run(&args, &config),
        Commands::Batch(args) => cmd::batch::run(&args, &config),
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}
