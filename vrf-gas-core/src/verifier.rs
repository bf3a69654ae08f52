//! The verifier capability benchmarked by vrf-gas.
//!
//! A [`Verifier`] is an already-deployed VRF verification component. Every
//! operation may be followed by [`Verifier::gas_used`], which reports the cost
//! of the most recent invocation. That counter is the only source of samples.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Execution cost reported by the verifier.
pub type Gas = u64;

/// An affine curve point with hex-encoded coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: String,
    pub y: String,
}

impl Point {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// A decoded VRF proof: the gamma point plus the `c` and `s` scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub gamma: Point,
    pub c: String,
    pub s: String,
}

/// The `V = s*H - c*Gamma` components supplied to the fast path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VComponents {
    #[serde(rename = "sH")]
    pub s_h: Point,
    #[serde(rename = "cGamma")]
    pub c_gamma: Point,
}

/// Precomputed inputs for fast verification (`U = s*B - c*Y` and `V`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastVerifyParams {
    pub u_point: Point,
    pub v_components: VComponents,
}

/// Errors surfaced by a verifier invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifierError {
    /// The verifier rejected the call (malformed input, revert).
    #[error("{operation} reverted: {reason}")]
    Reverted { operation: String, reason: String },

    /// The verifier could not be reached or timed out.
    #[error("Verifier unavailable: {0}")]
    Unavailable(String),

    /// The verifier answered with something that could not be understood.
    #[error("Invalid verifier response: {0}")]
    InvalidResponse(String),
}

impl VerifierError {
    pub fn reverted(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Reverted {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// An external VRF verifier.
///
/// Calls are expected to be issued one at a time; `gas_used` describes the
/// last completed call.
pub trait Verifier: Send + Sync {
    /// Decode a compressed public key into an affine point.
    fn decode_point(
        &self,
        compressed: &str,
    ) -> impl Future<Output = Result<Point, VerifierError>> + Send;

    /// Decode an encoded proof (`pi`).
    fn decode_proof(&self, proof: &str)
        -> impl Future<Output = Result<Proof, VerifierError>> + Send;

    /// Run full verification.
    fn verify(
        &self,
        public_key: &Point,
        proof: &Proof,
        message: &str,
    ) -> impl Future<Output = Result<(), VerifierError>> + Send;

    /// Run verification with precomputed `U` and `V` components.
    fn fast_verify(
        &self,
        public_key: &Point,
        proof: &Proof,
        message: &str,
        params: &FastVerifyParams,
    ) -> impl Future<Output = Result<(), VerifierError>> + Send;

    /// Derive the fast-path inputs for a proof.
    fn compute_fast_verify_params(
        &self,
        public_key: &Point,
        proof: &Proof,
        message: &str,
    ) -> impl Future<Output = Result<FastVerifyParams, VerifierError>> + Send;

    /// Hash the gamma point of a proof into the VRF output.
    fn gamma_to_hash(
        &self,
        gamma: &Point,
    ) -> impl Future<Output = Result<String, VerifierError>> + Send;

    /// Cost of the most recent invocation.
    fn gas_used(&self) -> impl Future<Output = Result<Gas, VerifierError>> + Send;
}
