//! HTTP server for the verifier harness.
//!
//! Each verifier operation gets its own endpoint. Calls are forwarded to the
//! wrapped [`Verifier`] as they arrive; the client is expected to issue them
//! one at a time and read `/gas-used` after each.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::watch;
use vrf_gas_core::protocol::{
    DecodePointRequest, DecodeProofRequest, ErrorResponse, FastVerifyRequest, GammaToHashRequest,
    GammaToHashResponse, GasUsedResponse, HealthResponse, InvocationResponse, ShutdownResponse,
    VerifyRequest,
};
use vrf_gas_core::{Verifier, VerifierError};

/// Shared state for the HTTP server.
struct AppState<V> {
    /// The verifier being exposed.
    verifier: V,
    /// Sender to signal shutdown.
    shutdown_tx: watch::Sender<bool>,
}

type SharedState<V> = State<Arc<AppState<V>>>;

/// Translate a verifier failure into an HTTP error response.
fn failure(operation: &str, err: VerifierError) -> Response {
    eprintln!("[harness] {} failed: {}", operation, err);

    let (status, message) = match err {
        VerifierError::Reverted { reason, .. } => (StatusCode::UNPROCESSABLE_ENTITY, reason),
        VerifierError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        VerifierError::InvalidResponse(msg) => (StatusCode::BAD_GATEWAY, msg),
    };
    (status, Json(ErrorResponse::new(message))).into_response()
}

fn respond<T: serde::Serialize>(operation: &str, result: Result<T, VerifierError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => failure(operation, err),
    }
}

/// Health check endpoint.
///
/// GET /health
/// Returns: { "status": "healthy" }
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// POST /decode-point
/// Body: { "compressed": "0x..." }
/// Returns: { "x": "...", "y": "..." }
async fn decode_point<V: Verifier + 'static>(
    State(state): SharedState<V>,
    Json(request): Json<DecodePointRequest>,
) -> Response {
    let result = state.verifier.decode_point(&request.compressed).await;
    respond("decodePoint", result)
}

/// POST /decode-proof
/// Body: { "proof": "0x..." }
/// Returns: { "gamma": { "x", "y" }, "c": "...", "s": "..." }
async fn decode_proof<V: Verifier + 'static>(
    State(state): SharedState<V>,
    Json(request): Json<DecodeProofRequest>,
) -> Response {
    let result = state.verifier.decode_proof(&request.proof).await;
    respond("decodeProof", result)
}

/// POST /verify
/// Body: { "public_key", "proof", "message" }
/// Returns: { "status": "completed" }
async fn verify<V: Verifier + 'static>(
    State(state): SharedState<V>,
    Json(request): Json<VerifyRequest>,
) -> Response {
    let result = state
        .verifier
        .verify(&request.public_key, &request.proof, &request.message)
        .await
        .map(|()| InvocationResponse::completed());
    respond("verify", result)
}

/// POST /fast-verify
/// Body: { "public_key", "proof", "message", "params" }
/// Returns: { "status": "completed" }
async fn fast_verify<V: Verifier + 'static>(
    State(state): SharedState<V>,
    Json(request): Json<FastVerifyRequest>,
) -> Response {
    let result = state
        .verifier
        .fast_verify(
            &request.public_key,
            &request.proof,
            &request.message,
            &request.params,
        )
        .await
        .map(|()| InvocationResponse::completed());
    respond("fastVerify", result)
}

/// POST /fast-verify-params
/// Body: { "public_key", "proof", "message" }
/// Returns: { "uPoint": {...}, "vComponents": { "sH": {...}, "cGamma": {...} } }
async fn fast_verify_params<V: Verifier + 'static>(
    State(state): SharedState<V>,
    Json(request): Json<VerifyRequest>,
) -> Response {
    let result = state
        .verifier
        .compute_fast_verify_params(&request.public_key, &request.proof, &request.message)
        .await;
    respond("computeFastVerifyParams", result)
}

/// POST /gamma-to-hash
/// Body: { "gamma": { "x", "y" } }
/// Returns: { "hash": "0x..." }
async fn gamma_to_hash<V: Verifier + 'static>(
    State(state): SharedState<V>,
    Json(request): Json<GammaToHashRequest>,
) -> Response {
    let result = state
        .verifier
        .gamma_to_hash(&request.gamma)
        .await
        .map(|hash| GammaToHashResponse { hash });
    respond("gammaToHash", result)
}

/// GET /gas-used
/// Returns: { "gas_used": ... }
async fn gas_used<V: Verifier + 'static>(State(state): SharedState<V>) -> Response {
    let result = state.verifier.gas_used().await.map(|gas_used| {
        eprintln!("[harness] Gas used: {}", gas_used);
        GasUsedResponse { gas_used }
    });
    respond("gasUsed", result)
}

/// Trigger graceful shutdown of the server.
///
/// POST /shutdown
/// Returns: { "status": "shutting_down" }
async fn shutdown<V: Verifier + 'static>(State(state): SharedState<V>) -> impl IntoResponse {
    let _ = state.shutdown_tx.send(true);
    (StatusCode::OK, Json(ShutdownResponse::acknowledged()))
}

/// Build the router with all endpoints.
fn build_router<V: Verifier + 'static>(state: Arc<AppState<V>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/decode-point", post(decode_point::<V>))
        .route("/decode-proof", post(decode_proof::<V>))
        .route("/verify", post(verify::<V>))
        .route("/fast-verify", post(fast_verify::<V>))
        .route("/fast-verify-params", post(fast_verify_params::<V>))
        .route("/gamma-to-hash", post(gamma_to_hash::<V>))
        .route("/gas-used", get(gas_used::<V>))
        .route("/shutdown", post(shutdown::<V>))
        .with_state(state)
}

/// Run the harness HTTP server.
///
/// This function starts an HTTP server on the specified port and blocks
/// until shutdown is requested via the `/shutdown` endpoint.
///
/// # Arguments
///
/// * `verifier` - The verifier to expose
/// * `port` - The port to listen on (binds to 0.0.0.0)
///
/// # Errors
///
/// Returns an error if the server fails to bind or encounters a runtime error.
pub fn run_harness<V: Verifier + 'static>(verifier: V, port: u16) -> anyhow::Result<()> {
    // Create a tokio runtime for the async server
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_harness_async(verifier, port).await })
}

/// Async implementation of the harness server.
///
/// Use this when you're already in a tokio runtime.
/// For standalone use, prefer `run_harness` which creates its own runtime.
pub async fn run_harness_async<V: Verifier + 'static>(
    verifier: V,
    port: u16,
) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;

    eprintln!("Verifier harness listening on {}", addr);

    serve(listener, verifier).await
}

/// Serve the harness on an already-bound listener until `/shutdown` is called.
pub async fn serve<V: Verifier + 'static>(
    listener: TcpListener,
    verifier: V,
) -> anyhow::Result<()> {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let state = Arc::new(AppState {
        verifier,
        shutdown_tx,
    });

    let app = build_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            while !*shutdown_rx.borrow() {
                if shutdown_rx.changed().await.is_err() {
                    break;
                }
            }
            eprintln!("Shutting down verifier harness");
        })
        .await?;

    Ok(())
}
