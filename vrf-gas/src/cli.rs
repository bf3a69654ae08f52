//! Command-line interface for vrf-gas.

use crate::benchmarks::GroupKind;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "vrf-gas")]
#[command(about = "Gas consumption statistics for VRF verification entry points")]
#[command(version)]
pub struct Cli {
    /// JSON file with the test vectors
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// URL of the running verifier harness
    #[arg(long)]
    pub verifier_url: Option<String>,

    /// Benchmark group to run (repeatable, replaces the configured list)
    #[arg(long, value_enum)]
    pub group: Vec<GroupKind>,

    /// Timeout for a single verifier call, in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Print every collected sample
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply CLI overrides to the configuration.
    ///
    /// CLI arguments take precedence over config file values.
    /// Only values given on the command line will override the config.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(fixtures) = &self.fixtures {
            config.fixtures.path = fixtures.clone();
        }

        if let Some(url) = &self.verifier_url {
            config.verifier.url = url.clone();
        }

        if !self.group.is_empty() {
            config.benchmark.groups = self.group.clone();
        }

        if let Some(timeout_ms) = self.timeout_ms {
            config.verifier.request_timeout_ms = timeout_ms;
        }

        if self.no_color {
            config.report.colors = false;
        }
    }
}
