use crate::consts::{DEFAULT_OFFSET, DEFAULT_ZERO_EPSILON};
use crate::error::{BinScoreError, BsResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Number of leading bins to leave out (e.g. an underflow bin)
    #[arg(long, default_value_t = DEFAULT_OFFSET)]
    pub offset: usize,

    /// Contents at or below this magnitude count as zero for the empty-bin skip
    #[arg(long, default_value_t = DEFAULT_ZERO_EPSILON)]
    pub zero_epsilon: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            zero_epsilon: DEFAULT_ZERO_EPSILON,
        }
    }
}

impl ScoringConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BsResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BsResult<()> {
        if !self.zero_epsilon.is_finite() || self.zero_epsilon < 0.0 {
            return Err(BinScoreError::Config(format!(
                "zero_epsilon must be a finite, non-negative number (got {})",
                self.zero_epsilon
            )));
        }
        Ok(())
    }

    /// Overlays values the user typed on the command line onto `self`.
    pub fn merge_from_cli(&mut self, cli: &ScoringConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(offset, "offset");
        update_if_present!(zero_epsilon, "zero_epsilon");
    }
}
