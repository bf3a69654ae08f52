//! Benchmark groups.
//!
//! Each group names the operation sequence run for one fixture vector and the
//! corpora it is run over. The gas reported after the final call of the
//! sequence becomes the vector's sample.

use serde::{Deserialize, Serialize};
use vrf_gas_core::{
    FastVerifyParams, FastVerifyVector, Fixtures, Gas, GasStats, GroupReport, PointVector,
    ProofVector, ReportError, Reporter, Verifier, VerifierError, VerifyVector,
};

use crate::collector::{CollectError, GasSamples, SampleCollector};

/// A benchmark group that can be selected from the config file or CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKind {
    /// Full verification of the `verify` vectors.
    Verify,
    /// Fast verification, with precomputed and then derived components.
    FastVerify,
    /// Proof decoding over the `proofs` vectors.
    DecodeProof,
    /// Point decompression over the `points` vectors.
    DecodePoint,
    /// Fast-path component derivation over the `verify` vectors.
    ComputeFastVerifyParams,
    /// VRF output hashing over the `verify` vectors.
    GammaToHash,
}

impl GroupKind {
    /// Heading used for this group in the report.
    pub fn label(self) -> &'static str {
        match self {
            GroupKind::Verify => "verify()",
            GroupKind::FastVerify => "fastVerify() (1) && fastVerify()",
            GroupKind::DecodeProof => "decodeProof()",
            GroupKind::DecodePoint => "decodePoint()",
            GroupKind::ComputeFastVerifyParams => "computeFastVerifyParams()",
            GroupKind::GammaToHash => "gammaToHash()",
        }
    }
}

/// Collect the samples of one group.
///
/// Vectors are processed strictly in corpus order, one verifier call at a
/// time.
///
/// # Errors
///
/// Fails on the first verifier error, or if the group's corpora hold no
/// valid vectors.
pub async fn run_group<V: Verifier>(
    kind: GroupKind,
    verifier: &V,
    fixtures: &Fixtures,
    verbose: bool,
) -> Result<GasSamples, CollectError> {
    let mut collector = SampleCollector::new(kind.label()).verbose(verbose);

    match kind {
        GroupKind::Verify => {
            collector
                .collect(&fixtures.verify.valid, |v| measure_verify(verifier, v))
                .await?;
        }
        GroupKind::FastVerify => {
            collector
                .collect(&fixtures.fast_verify.valid, |v| {
                    measure_fast_verify(verifier, v)
                })
                .await?
                .collect(&fixtures.verify.valid, |v| {
                    measure_derived_fast_verify(verifier, v)
                })
                .await?;
        }
        GroupKind::DecodeProof => {
            collector
                .collect(&fixtures.proofs.valid, |v| measure_decode_proof(verifier, v))
                .await?;
        }
        GroupKind::DecodePoint => {
            collector
                .collect(&fixtures.points.valid, |v| measure_decode_point(verifier, v))
                .await?;
        }
        GroupKind::ComputeFastVerifyParams => {
            collector
                .collect(&fixtures.verify.valid, |v| {
                    measure_compute_params(verifier, v)
                })
                .await?;
        }
        GroupKind::GammaToHash => {
            collector
                .collect(&fixtures.verify.valid, |v| measure_gamma_to_hash(verifier, v))
                .await?;
        }
    }

    collector.finish()
}

/// Outcome of a multi-group run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Reports of the groups that completed, in run order.
    pub reports: Vec<GroupReport>,
    /// Errors of the groups that did not.
    pub failures: Vec<CollectError>,
}

/// Run `groups` in order, handing each report to `reporter` as soon as its
/// group completes.
///
/// A failing group is logged and recorded in the summary; the remaining
/// groups still run.
///
/// # Errors
///
/// Returns an error only if the reporter fails.
pub async fn run_groups<V: Verifier, R: Reporter>(
    groups: &[GroupKind],
    verifier: &V,
    fixtures: &Fixtures,
    reporter: &R,
    verbose: bool,
) -> Result<RunSummary, ReportError> {
    let mut summary = RunSummary::default();

    for &kind in groups {
        eprintln!("Collecting {}...", kind.label());

        match run_group(kind, verifier, fixtures, verbose).await {
            Ok(samples) => {
                let stats = GasStats::from_samples(&samples.samples);
                let report = GroupReport::new(samples.name, stats);
                reporter.report(std::slice::from_ref(&report))?;
                summary.reports.push(report);
            }
            Err(err) => {
                eprintln!("Skipping {}: {}", kind.label(), err);
                summary.failures.push(err);
            }
        }
    }

    Ok(summary)
}

async fn measure_verify<V: Verifier>(
    verifier: &V,
    vector: &VerifyVector,
) -> Result<Gas, VerifierError> {
    let public_key = verifier.decode_point(&vector.public_key).await?;
    let proof = verifier.decode_proof(&vector.proof).await?;
    verifier.verify(&public_key, &proof, &vector.message).await?;
    verifier.gas_used().await
}

async fn measure_fast_verify<V: Verifier>(
    verifier: &V,
    vector: &FastVerifyVector,
) -> Result<Gas, VerifierError> {
    let proof = verifier.decode_proof(&vector.proof).await?;
    let params = FastVerifyParams {
        u_point: vector.u_point.clone(),
        v_components: vector.v_components.clone(),
    };
    verifier
        .fast_verify(&vector.public_key, &proof, &vector.message, &params)
        .await?;
    verifier.gas_used().await
}

/// Fast verification of a `verify` vector, deriving U and V on the fly.
async fn measure_derived_fast_verify<V: Verifier>(
    verifier: &V,
    vector: &VerifyVector,
) -> Result<Gas, VerifierError> {
    let public_key = verifier.decode_point(&vector.public_key).await?;
    let proof = verifier.decode_proof(&vector.proof).await?;
    let params = verifier
        .compute_fast_verify_params(&public_key, &proof, &vector.message)
        .await?;
    verifier
        .fast_verify(&public_key, &proof, &vector.message, &params)
        .await?;
    verifier.gas_used().await
}

async fn measure_decode_proof<V: Verifier>(
    verifier: &V,
    vector: &ProofVector,
) -> Result<Gas, VerifierError> {
    verifier.decode_proof(&vector.proof).await?;
    verifier.gas_used().await
}

async fn measure_decode_point<V: Verifier>(
    verifier: &V,
    vector: &PointVector,
) -> Result<Gas, VerifierError> {
    verifier.decode_point(&vector.compressed).await?;
    verifier.gas_used().await
}

async fn measure_compute_params<V: Verifier>(
    verifier: &V,
    vector: &VerifyVector,
) -> Result<Gas, VerifierError> {
    let public_key = verifier.decode_point(&vector.public_key).await?;
    let proof = verifier.decode_proof(&vector.proof).await?;
    verifier
        .compute_fast_verify_params(&public_key, &proof, &vector.message)
        .await?;
    verifier.gas_used().await
}

async fn measure_gamma_to_hash<V: Verifier>(
    verifier: &V,
    vector: &VerifyVector,
) -> Result<Gas, VerifierError> {
    let proof = verifier.decode_proof(&vector.proof).await?;
    verifier.gamma_to_hash(&proof.gamma).await?;
    verifier.gas_used().await
}
