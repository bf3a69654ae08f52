//! JSON protocol spoken between the vrf-gas client and a verifier harness.
//!
//! Successful calls answer `200 OK` with the response type named below;
//! failures answer a non-2xx status carrying an [`ErrorResponse`].

use serde::{Deserialize, Serialize};

use crate::verifier::{FastVerifyParams, Gas, Point, Proof};

/// Health check response from the harness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    /// Create a healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// `POST /decode-point`, answered with a [`Point`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodePointRequest {
    pub compressed: String,
}

/// `POST /decode-proof`, answered with a [`Proof`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeProofRequest {
    pub proof: String,
}

/// `POST /verify` and `POST /fast-verify-params`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub public_key: Point,
    pub proof: Proof,
    pub message: String,
}

impl VerifyRequest {
    pub fn new(public_key: &Point, proof: &Proof, message: &str) -> Self {
        Self {
            public_key: public_key.clone(),
            proof: proof.clone(),
            message: message.to_string(),
        }
    }
}

/// `POST /fast-verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastVerifyRequest {
    pub public_key: Point,
    pub proof: Proof,
    pub message: String,
    pub params: FastVerifyParams,
}

/// `POST /gamma-to-hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GammaToHashRequest {
    pub gamma: Point,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GammaToHashResponse {
    pub hash: String,
}

/// Acknowledges a call that only has a side effect (`/verify`, `/fast-verify`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationResponse {
    pub status: String,
}

impl InvocationResponse {
    pub fn completed() -> Self {
        Self {
            status: "completed".to_string(),
        }
    }
}

/// `GET /gas-used`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasUsedResponse {
    pub gas_used: Gas,
}

/// Body of every failed call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Response to a shutdown request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutdownResponse {
    pub status: String,
}

impl ShutdownResponse {
    /// Create a shutdown acknowledgment response.
    pub fn acknowledged() -> Self {
        Self {
            status: "shutting_down".to_string(),
        }
    }
}
