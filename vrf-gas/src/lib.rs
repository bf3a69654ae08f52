//! vrf-gas: gas consumption statistics for VRF verification
//!
//! This library drives a deployed VRF verifier over a fixture corpus,
//! collects the gas reported for each call and summarizes every benchmark
//! group with the fixed-point statistics from `vrf-gas-core`.

pub mod benchmarks;
pub mod cli;
pub mod client;
pub mod collector;
pub mod config;

// Re-export core types for convenience
pub use vrf_gas_core::protocol;
pub use vrf_gas_core::{
    Fixtures, GasStats, GroupReport, Median, ReportError, Reporter, TerminalReporter, Verifier,
    VerifierError,
};

// Re-export main types from this crate
pub use benchmarks::{run_group, run_groups, GroupKind, RunSummary};
pub use cli::Cli;
pub use client::{wait_for_health, ClientError, VerifierClient};
pub use collector::{CollectError, GasSamples, SampleCollector};
pub use config::Config;
