//! Sample collection.
//!
//! A [`SampleCollector`] drives one operation over a fixture corpus and
//! appends the gas reported for each vector, in invocation order. Several
//! corpora may be appended to the same group before it is closed.

use std::future::Future;

use thiserror::Error;
use vrf_gas_core::{Gas, VerifierError};

/// Errors that can occur while collecting samples.
#[derive(Debug, Error)]
pub enum CollectError {
    /// A verifier call failed; the rest of the group is abandoned.
    #[error("{group}: vector {index} failed: {source}")]
    Invocation {
        group: String,
        index: usize,
        #[source]
        source: VerifierError,
    },

    /// The group was closed without any samples.
    #[error("{0}: no valid vectors to benchmark")]
    Empty(String),
}

/// A closed, non-empty sequence of gas samples for one benchmark group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasSamples {
    /// Name of the benchmark group.
    pub name: String,
    /// Samples in collection order.
    pub samples: Vec<Gas>,
}

/// Accumulates gas samples for one benchmark group.
#[derive(Debug)]
pub struct SampleCollector {
    name: String,
    samples: Vec<Gas>,
    verbose: bool,
}

impl SampleCollector {
    /// Create a new empty collector.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            samples: Vec::new(),
            verbose: false,
        }
    }

    /// Print every sample to stderr as it is collected.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Number of samples collected so far.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if no samples have been collected yet.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Run `operation` on each vector in order and append the gas it reports.
    ///
    /// Each call is awaited before the next one starts. The first failure
    /// stops collection and is returned with the index of the failing vector
    /// within `vectors`.
    pub async fn collect<I, F, Fut>(
        &mut self,
        vectors: I,
        mut operation: F,
    ) -> Result<&mut Self, CollectError>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = Result<Gas, VerifierError>>,
    {
        for (index, vector) in vectors.into_iter().enumerate() {
            let gas = operation(vector)
                .await
                .map_err(|source| CollectError::Invocation {
                    group: self.name.clone(),
                    index,
                    source,
                })?;

            if self.verbose {
                eprintln!("[{}] #{}: {} gas", self.name, self.samples.len() + 1, gas);
            }
            self.samples.push(gas);
        }

        Ok(self)
    }

    /// Close the group.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Empty`] if nothing was collected.
    pub fn finish(self) -> Result<GasSamples, CollectError> {
        if self.samples.is_empty() {
            return Err(CollectError::Empty(self.name));
        }

        Ok(GasSamples {
            name: self.name,
            samples: self.samples,
        })
    }
}
