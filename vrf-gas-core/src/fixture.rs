//! Test-vector fixtures.
//!
//! The corpus is a JSON document with one section per category, each holding
//! `valid` (and `invalid`) vectors. Only valid vectors are benchmarked; byte
//! strings are kept hex-encoded and handed to the verifier untouched.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::verifier::{Point, VComponents};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixtures: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse fixtures: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The complete fixture corpus.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    #[serde(default)]
    pub verify: Category<VerifyVector>,
    #[serde(default)]
    pub fast_verify: Category<FastVerifyVector>,
    #[serde(default)]
    pub proofs: Category<ProofVector>,
    #[serde(default)]
    pub points: Category<PointVector>,
}

/// Vectors of one category. Invalid vectors are not read.
#[derive(Debug, Clone, Deserialize)]
pub struct Category<T> {
    #[serde(default = "Vec::new")]
    pub valid: Vec<T>,
}

impl<T> Default for Category<T> {
    fn default() -> Self {
        Self { valid: Vec::new() }
    }
}

/// Inputs to a full verification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyVector {
    /// Compressed public key.
    #[serde(rename = "pub")]
    pub public_key: String,
    /// Encoded proof.
    #[serde(rename = "pi")]
    pub proof: String,
    pub message: String,
}

/// Inputs to a fast verification with precomputed components.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastVerifyVector {
    pub public_key: Point,
    #[serde(rename = "pi")]
    pub proof: String,
    pub message: String,
    pub u_point: Point,
    pub v_components: VComponents,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProofVector {
    #[serde(rename = "pi")]
    pub proof: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PointVector {
    pub compressed: String,
}

impl Fixtures {
    /// Load fixtures from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid corpus.
    pub fn load(path: &Path) -> Result<Fixtures, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse fixtures from a JSON string.
    pub fn from_json(content: &str) -> Result<Fixtures, FixtureError> {
        Ok(serde_json::from_str(content)?)
    }
}
