//! HTTP client for a running verifier harness.
//!
//! [`VerifierClient`] implements [`Verifier`] by forwarding each operation to
//! the harness endpoints, so benchmark groups can run against a remote
//! verifier exactly as they would against an in-process one.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::time::sleep;

use vrf_gas_core::protocol::{
    DecodePointRequest, DecodeProofRequest, ErrorResponse, FastVerifyRequest, GammaToHashRequest,
    GammaToHashResponse, GasUsedResponse, HealthResponse, InvocationResponse, ShutdownResponse,
    VerifyRequest,
};
use vrf_gas_core::{FastVerifyParams, Gas, Point, Proof, Verifier, VerifierError};

/// Errors that can occur while connecting to a harness.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Build(String),

    /// HTTP request to the harness failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The harness answered but reported a non-healthy status.
    #[error("Unhealthy status: {0}")]
    Unhealthy(String),

    /// Harness did not become ready within the timeout period.
    #[error("Verifier at {url} not ready after {timeout_ms}ms timeout. Last error: {last_error}")]
    NotReady {
        url: String,
        timeout_ms: u128,
        last_error: String,
    },
}

/// Client for a verifier harness reachable over HTTP.
#[derive(Debug, Clone)]
pub struct VerifierClient {
    base_url: String,
    client: reqwest::Client,
}

impl VerifierClient {
    /// Create a client for a harness that is already running.
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the harness (e.g., "http://localhost:9200")
    /// * `request_timeout` - Upper bound on a single verifier call
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the client cannot be created.
    pub fn connect(url: &str, request_timeout: Duration) -> Result<Self, ClientError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "URL must start with http:// or https://: {}",
                url
            )));
        }

        let base_url = url.trim_end_matches('/').to_string();

        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Get the base URL for this harness.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if the harness is healthy.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check fails.
    pub async fn health_check(&self) -> Result<HealthResponse, ClientError> {
        let response: HealthResponse = self
            .client
            .get(self.endpoint("/health"))
            .send()
            .await?
            .json()
            .await?;

        if response.status == "healthy" {
            Ok(response)
        } else {
            Err(ClientError::Unhealthy(response.status))
        }
    }

    /// Request the harness to shut down gracefully.
    ///
    /// # Errors
    ///
    /// Returns an error if the shutdown request fails.
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        let _response: ShutdownResponse = self
            .client
            .post(self.endpoint("/shutdown"))
            .send()
            .await?
            .json()
            .await?;
        Ok(())
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        body: &B,
    ) -> Result<T, VerifierError> {
        let request = self.client.post(self.endpoint(path)).json(body);
        self.call(operation, request).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<T, VerifierError> {
        let response = request
            .send()
            .await
            .map_err(|e| VerifierError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| VerifierError::InvalidResponse(format!("{}: {}", operation, e)));
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);

        Err(match status {
            StatusCode::UNPROCESSABLE_ENTITY => VerifierError::reverted(operation, message),
            StatusCode::SERVICE_UNAVAILABLE => VerifierError::Unavailable(message),
            _ => VerifierError::InvalidResponse(format!(
                "{} answered {}: {}",
                operation, status, message
            )),
        })
    }
}

impl Verifier for VerifierClient {
    async fn decode_point(&self, compressed: &str) -> Result<Point, VerifierError> {
        let request = DecodePointRequest {
            compressed: compressed.to_string(),
        };
        self.post("decodePoint", "/decode-point", &request).await
    }

    async fn decode_proof(&self, proof: &str) -> Result<Proof, VerifierError> {
        let request = DecodeProofRequest {
            proof: proof.to_string(),
        };
        self.post("decodeProof", "/decode-proof", &request).await
    }

    async fn verify(
        &self,
        public_key: &Point,
        proof: &Proof,
        message: &str,
    ) -> Result<(), VerifierError> {
        let request = VerifyRequest::new(public_key, proof, message);
        let _: InvocationResponse = self.post("verify", "/verify", &request).await?;
        Ok(())
    }

    async fn fast_verify(
        &self,
        public_key: &Point,
        proof: &Proof,
        message: &str,
        params: &FastVerifyParams,
    ) -> Result<(), VerifierError> {
        let request = FastVerifyRequest {
            public_key: public_key.clone(),
            proof: proof.clone(),
            message: message.to_string(),
            params: params.clone(),
        };
        let _: InvocationResponse = self.post("fastVerify", "/fast-verify", &request).await?;
        Ok(())
    }

    async fn compute_fast_verify_params(
        &self,
        public_key: &Point,
        proof: &Proof,
        message: &str,
    ) -> Result<FastVerifyParams, VerifierError> {
        let request = VerifyRequest::new(public_key, proof, message);
        self.post("computeFastVerifyParams", "/fast-verify-params", &request)
            .await
    }

    async fn gamma_to_hash(&self, gamma: &Point) -> Result<String, VerifierError> {
        let request = GammaToHashRequest {
            gamma: gamma.clone(),
        };
        let response: GammaToHashResponse =
            self.post("gammaToHash", "/gamma-to-hash", &request).await?;
        Ok(response.hash)
    }

    async fn gas_used(&self) -> Result<Gas, VerifierError> {
        let request = self.client.get(self.endpoint("/gas-used"));
        let response: GasUsedResponse = self.call("gasUsed", request).await?;
        Ok(response.gas_used)
    }
}

/// Wait for a harness to become healthy, with retries.
pub async fn wait_for_health(
    client: &VerifierClient,
    timeout: Duration,
) -> Result<(), ClientError> {
    let start = std::time::Instant::now();
    let retry_interval = Duration::from_millis(100);
    let mut last_error: Option<ClientError> = None;

    loop {
        match client.health_check().await {
            Ok(_) => return Ok(()),
            Err(e) if start.elapsed() < timeout => {
                last_error = Some(e);
                sleep(retry_interval).await;
            }
            Err(e) => {
                let error_msg = last_error
                    .map(|le| le.to_string())
                    .unwrap_or_else(|| e.to_string());
                return Err(ClientError::NotReady {
                    url: client.base_url().to_string(),
                    timeout_ms: timeout.as_millis(),
                    last_error: error_msg,
                });
            }
        }
    }
}
