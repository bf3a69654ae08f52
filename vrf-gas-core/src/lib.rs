//! Core types and the statistics engine for vrf-gas.
//!
//! This crate holds everything shared by the vrf-gas CLI and the verifier
//! harness: the fixed-point decimal type, gas statistics, report rendering,
//! the fixture model, the [`Verifier`] capability and its wire protocol.

pub mod fixed;
pub mod fixture;
pub mod protocol;
pub mod report;
pub mod stats;
pub mod verifier;

// Re-export main types for convenience
pub use fixed::{FixedNumber, ParseFixedError};
pub use fixture::{
    Category, FastVerifyVector, FixtureError, Fixtures, PointVector, ProofVector, VerifyVector,
};
pub use report::{GroupReport, ReportError, Reporter, TerminalReporter};
pub use stats::{descent_sqrt, GasStats, Median};
pub use verifier::{FastVerifyParams, Gas, Point, Proof, VComponents, Verifier, VerifierError};
