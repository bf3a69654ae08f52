//! Configuration loading for vrf-gas.
//!
//! Supports loading configuration from TOML files, with sensible defaults
//! for all settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::benchmarks::GroupKind;

/// Top-level configuration for vrf-gas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the test vectors live.
    pub fixtures: FixturesConfig,
    /// How to reach the verifier harness.
    pub verifier: VerifierConfig,
    /// Which benchmark groups to run.
    pub benchmark: BenchmarkConfig,
    /// Report rendering.
    pub report: ReportConfig,
}

/// Configuration for the fixture corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturesConfig {
    /// Path to the JSON test-vector file.
    pub path: PathBuf,
}

/// Configuration for verifier communication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Base URL of the verifier harness.
    pub url: String,
    /// Timeout in milliseconds for a single verifier call.
    pub request_timeout_ms: u64,
    /// How long to wait in milliseconds for the harness to report healthy.
    pub ready_timeout_ms: u64,
}

/// Configuration for benchmark selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Groups to collect, in order.
    pub groups: Vec<GroupKind>,
}

/// Configuration for the terminal report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Whether to color the report.
    pub colors: bool,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("test/data.json"),
        }
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:9200".to_string(),
            request_timeout_ms: 30_000, // 30 seconds
            ready_timeout_ms: 30_000,
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            groups: vec![GroupKind::Verify, GroupKind::FastVerify],
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { colors: true }
    }
}

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = ".vrf-gas.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from `path`, or use defaults if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load_or_default(path: &Path) -> Result<Config> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }
}
