//! Verifier harness for vrf-gas
//!
//! Wraps any [`Verifier`] implementation in an HTTP server so the vrf-gas
//! CLI can drive it remotely. The harness exposes one endpoint per verifier
//! operation plus `/gas-used`, which reports the cost of the last call.

mod server;

pub use server::{run_harness, run_harness_async, serve};

use std::sync::atomic::{AtomicU64, Ordering};

use vrf_gas_core::Gas;

/// Records the gas cost of the most recent verifier invocation.
///
/// Verifier implementations call [`GasMeter::record`] at the end of every
/// operation and answer [`Verifier::gas_used`] with [`GasMeter::last`].
///
/// # Example
///
/// ```ignore
/// async fn verify(&self, key: &Point, proof: &Proof, message: &str) -> Result<(), VerifierError> {
///     let receipt = self.contract.verify(key, proof, message).await?;
///     self.meter.record(receipt.gas_used);
///     Ok(())
/// }
/// ```
///
/// [`Verifier`]: vrf_gas_core::Verifier
/// [`Verifier::gas_used`]: vrf_gas_core::Verifier::gas_used
#[derive(Debug, Default)]
pub struct GasMeter {
    last: AtomicU64,
}

impl GasMeter {
    /// Create a meter that reports zero until the first recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the cost of the call that just completed.
    pub fn record(&self, gas: Gas) {
        self.last.store(gas, Ordering::SeqCst);
    }

    /// Cost of the most recently recorded call.
    pub fn last(&self) -> Gas {
        self.last.load(Ordering::SeqCst)
    }
}
