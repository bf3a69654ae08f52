//! Integration tests for vrf-gas.
//!
//! These tests run the HTTP harness around a synthetic verifier and drive it
//! through [`VerifierClient`], exercising the same path as the CLI.

use tokio::net::TcpListener;
use vrf_gas::{
    run_group, run_groups, wait_for_health, CollectError, Fixtures, GasStats, GroupKind,
    GroupReport, Median, ReportError, Reporter, TerminalReporter, Verifier, VerifierClient,
    VerifierError,
};
use vrf_gas_core::{FastVerifyParams, Gas, Point, Proof, VComponents};
use vrf_gas_harness::GasMeter;

use std::sync::Mutex;
use std::time::Duration;

/// Charges the numeric value of the hex message for every verification.
///
/// The message `0xbad` is rejected.
#[derive(Default)]
struct MessageCostVerifier {
    meter: GasMeter,
}

fn message_cost(message: &str) -> Result<Gas, VerifierError> {
    Gas::from_str_radix(message.trim_start_matches("0x"), 16)
        .map_err(|e| VerifierError::reverted("verify", e.to_string()))
}

impl Verifier for MessageCostVerifier {
    async fn decode_point(&self, compressed: &str) -> Result<Point, VerifierError> {
        self.meter.record(9_000);
        Ok(Point::new(compressed, "0x1"))
    }

    async fn decode_proof(&self, proof: &str) -> Result<Proof, VerifierError> {
        self.meter.record(11_000);
        Ok(Proof {
            gamma: Point::new(proof, "0x2"),
            c: "0x3".to_string(),
            s: "0x4".to_string(),
        })
    }

    async fn verify(
        &self,
        _public_key: &Point,
        _proof: &Proof,
        message: &str,
    ) -> Result<(), VerifierError> {
        if message == "0xbad" {
            return Err(VerifierError::reverted("verify", "invalid proof"));
        }
        self.meter.record(message_cost(message)?);
        Ok(())
    }

    async fn fast_verify(
        &self,
        _public_key: &Point,
        _proof: &Proof,
        message: &str,
        _params: &FastVerifyParams,
    ) -> Result<(), VerifierError> {
        self.meter.record(message_cost(message)?);
        Ok(())
    }

    async fn compute_fast_verify_params(
        &self,
        _public_key: &Point,
        _proof: &Proof,
        _message: &str,
    ) -> Result<FastVerifyParams, VerifierError> {
        self.meter.record(1_000_000);
        Ok(FastVerifyParams {
            u_point: Point::new("0x5", "0x6"),
            v_components: VComponents {
                s_h: Point::new("0x7", "0x8"),
                c_gamma: Point::new("0x9", "0xa"),
            },
        })
    }

    async fn gamma_to_hash(&self, gamma: &Point) -> Result<String, VerifierError> {
        self.meter.record(4_000);
        Ok(format!("{}ff", gamma.x))
    }

    async fn gas_used(&self) -> Result<Gas, VerifierError> {
        Ok(self.meter.last())
    }
}

/// verify messages cost 100, 200 and 300; fastVerify messages 50 and 150.
const CORPUS: &str = r#"{
    "verify": { "valid": [
        { "pub": "0x02a1", "pi": "0x03a1", "message": "0x64" },
        { "pub": "0x02a2", "pi": "0x03a2", "message": "0xc8" },
        { "pub": "0x02a3", "pi": "0x03a3", "message": "0x12c" }
    ] },
    "fastVerify": { "valid": [
        {
            "publicKey": { "x": "0xb1", "y": "0xb2" },
            "pi": "0x03b1",
            "message": "0x32",
            "uPoint": { "x": "0xc1", "y": "0xc2" },
            "vComponents": { "sH": { "x": "0xd1", "y": "0xd2" }, "cGamma": { "x": "0xe1", "y": "0xe2" } }
        },
        {
            "publicKey": { "x": "0xb3", "y": "0xb4" },
            "pi": "0x03b2",
            "message": "0x96",
            "uPoint": { "x": "0xc3", "y": "0xc4" },
            "vComponents": { "sH": { "x": "0xd3", "y": "0xd4" }, "cGamma": { "x": "0xe3", "y": "0xe4" } }
        }
    ] },
    "proofs": { "valid": [ { "pi": "0x03f1" } ] },
    "points": { "valid": [] }
}"#;

/// Start a harness on an ephemeral port and return a ready client.
async fn start_harness() -> VerifierClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(vrf_gas_harness::serve(
        listener,
        MessageCostVerifier::default(),
    ));

    let client =
        VerifierClient::connect(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    wait_for_health(&client, Duration::from_secs(5)).await.unwrap();
    client
}

#[tokio::test]
async fn test_verify_group_statistics() {
    let client = start_harness().await;
    let fixtures = Fixtures::from_json(CORPUS).unwrap();

    let samples = run_group(GroupKind::Verify, &client, &fixtures, false)
        .await
        .unwrap();
    assert_eq!(samples.name, "verify()");
    assert_eq!(samples.samples, vec![100, 200, 300]);

    let stats = GasStats::from_samples(&samples.samples);
    assert_eq!(stats.min, 100);
    assert_eq!(stats.max, 300);
    assert_eq!(stats.mean.to_string(), "200.0");
    assert_eq!(stats.variance.to_string(), "6666.666666666666666666");
    assert_eq!(stats.std_dev.to_string(), "81.649658092772603273");
    assert_eq!(stats.median, Median::Exact(200));

    client.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_fast_verify_group_statistics() {
    let client = start_harness().await;
    let fixtures = Fixtures::from_json(CORPUS).unwrap();

    let samples = run_group(GroupKind::FastVerify, &client, &fixtures, false)
        .await
        .unwrap();
    // Precomputed vectors first, then verify vectors with derived params
    assert_eq!(samples.samples, vec![50, 150, 100, 200, 300]);

    let stats = GasStats::from_samples(&samples.samples);
    assert_eq!(stats.sample_count, 5);
    assert_eq!(stats.min, 50);
    assert_eq!(stats.max, 300);
    assert_eq!(stats.mean.to_string(), "160.0");
    assert_eq!(stats.variance.to_string(), "7400.0");
    assert_eq!(stats.median, Median::Exact(150));

    client.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_auxiliary_groups_over_http() {
    let client = start_harness().await;
    let fixtures = Fixtures::from_json(CORPUS).unwrap();

    let samples = run_group(GroupKind::GammaToHash, &client, &fixtures, false)
        .await
        .unwrap();
    assert_eq!(samples.samples, vec![4_000, 4_000, 4_000]);

    let samples = run_group(GroupKind::DecodeProof, &client, &fixtures, false)
        .await
        .unwrap();
    assert_eq!(samples.samples, vec![11_000]);

    // No valid points in the corpus
    let result = run_group(GroupKind::DecodePoint, &client, &fixtures, false).await;
    assert!(matches!(result, Err(CollectError::Empty(_))));

    client.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_revert_propagates_through_harness() {
    let client = start_harness().await;
    let fixtures = Fixtures::from_json(
        r#"{ "verify": { "valid": [
            { "pub": "0x02a1", "pi": "0x03a1", "message": "0x64" },
            { "pub": "0x02a2", "pi": "0x03a2", "message": "0xbad" }
        ] } }"#,
    )
    .unwrap();

    let result = run_group(GroupKind::Verify, &client, &fixtures, false).await;
    match result {
        Err(CollectError::Invocation {
            group,
            index,
            source,
        }) => {
            assert_eq!(group, "verify()");
            assert_eq!(index, 1);
            assert_eq!(source, VerifierError::reverted("verify", "invalid proof"));
        }
        other => panic!("Expected invocation error, got {:?}", other),
    }

    client.shutdown().await.unwrap();
}

/// Renders reports without colors into memory.
struct BufferReporter {
    terminal: TerminalReporter,
    output: Mutex<Vec<u8>>,
}

impl BufferReporter {
    fn new() -> Self {
        Self {
            terminal: TerminalReporter::without_colors(),
            output: Mutex::new(Vec::new()),
        }
    }

    fn output(&self) -> String {
        String::from_utf8(self.output.lock().unwrap().clone()).unwrap()
    }
}

impl Reporter for BufferReporter {
    fn report(&self, results: &[GroupReport]) -> Result<(), ReportError> {
        let mut output = self.output.lock().unwrap();
        self.terminal.write_to(&mut *output, results)?;
        Ok(())
    }
}

#[tokio::test]
async fn test_report_survives_a_later_group_failure() {
    let client = start_harness().await;
    // "0xzz" is not a hex cost, so every fastVerify call reverts
    let fixtures = Fixtures::from_json(
        r#"{
            "verify": { "valid": [
                { "pub": "0x02a1", "pi": "0x03a1", "message": "0x64" },
                { "pub": "0x02a2", "pi": "0x03a2", "message": "0xc8" },
                { "pub": "0x02a3", "pi": "0x03a3", "message": "0x12c" }
            ] },
            "fastVerify": { "valid": [ {
                "publicKey": { "x": "0xb1", "y": "0xb2" },
                "pi": "0x03b1",
                "message": "0xzz",
                "uPoint": { "x": "0xc1", "y": "0xc2" },
                "vComponents": { "sH": { "x": "0xd1", "y": "0xd2" }, "cGamma": { "x": "0xe1", "y": "0xe2" } }
            } ] }
        }"#,
    )
    .unwrap();
    let reporter = BufferReporter::new();

    let summary = run_groups(
        &[GroupKind::Verify, GroupKind::FastVerify],
        &client,
        &fixtures,
        &reporter,
        false,
    )
    .await
    .unwrap();

    let output = reporter.output();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "verify() (3 samples)");
    assert_eq!(lines[2], "Min: 100");
    assert_eq!(lines[3], "Max: 300");
    assert_eq!(
        lines[4],
        "Average (std): 200.0 (81.649658092772603273 = sqrt(6666.666666666666666666))"
    );
    assert_eq!(lines[5], "Median: 200");
    assert!(!output.contains("fastVerify()"));

    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.failures.len(), 1);
    match &summary.failures[0] {
        CollectError::Invocation { group, index, source } => {
            assert_eq!(group, "fastVerify() (1) && fastVerify()");
            assert_eq!(*index, 0);
            assert!(matches!(source, VerifierError::Reverted { .. }));
        }
        other => panic!("Expected invocation error, got {:?}", other),
    }

    client.shutdown().await.unwrap();
}

#[cfg(test)]
mod protocol_tests {
    use vrf_gas::protocol::*;

    #[test]
    fn test_health_response_roundtrip() {
        let original = HealthResponse::healthy();
        let json = serde_json::to_string(&original).unwrap();
        let deserialized: HealthResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.status, "healthy");
    }

    #[test]
    fn test_invocation_response_roundtrip() {
        let json = serde_json::to_string(&InvocationResponse::completed()).unwrap();
        let deserialized: InvocationResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.status, "completed");
    }

    #[test]
    fn test_gas_used_response_parses() {
        let response: GasUsedResponse = serde_json::from_str(r#"{"gas_used": 1543210}"#).unwrap();
        assert_eq!(response.gas_used, 1_543_210);
    }
}
