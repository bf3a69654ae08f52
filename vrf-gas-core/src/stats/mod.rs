use std::fmt;

mod sqrt;
pub use sqrt::descent_sqrt;

use crate::fixed::FixedNumber;
use crate::verifier::Gas;

/// The median of a sample set.
///
/// An odd-length set yields its exact middle sample. An even-length set
/// averages the two middle samples in fixed-point space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Median {
    Exact(Gas),
    Averaged(FixedNumber),
}

impl fmt::Display for Median {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Median::Exact(gas) => write!(f, "{}", gas),
            Median::Averaged(value) => write!(f, "{}", value),
        }
    }
}

/// Summary statistics for one sequence of gas samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasStats {
    pub sample_count: usize,
    pub min: Gas,
    pub max: Gas,
    pub sum: u128,
    pub mean: FixedNumber,
    /// Population variance (divisor `n`).
    pub variance: FixedNumber,
    pub std_dev: FixedNumber,
    pub median: Median,
}

impl GasStats {
    /// Reduce a sequence of gas samples to summary statistics.
    ///
    /// # Panics
    /// Panics if `samples` is empty.
    pub fn from_samples(samples: &[Gas]) -> Self {
        assert!(
            !samples.is_empty(),
            "cannot compute statistics of an empty sample sequence"
        );

        let (min, max, sum) = extrema_and_sum(samples);
        let count = FixedNumber::from_integer(samples.len() as i128);

        let mean = fixed_from_sum(sum).div_unsafe(count);

        let variance = samples
            .iter()
            .map(|&gas| FixedNumber::from_gas(gas).sub_unsafe(mean))
            .fold(FixedNumber::ZERO, |acc, deviation| {
                acc.add_unsafe(deviation.mul_unsafe(deviation))
            })
            .div_unsafe(count);

        Self {
            sample_count: samples.len(),
            min,
            max,
            sum,
            mean,
            variance,
            std_dev: descent_sqrt(variance),
            median: median(samples),
        }
    }
}

/// Single pass; strict comparisons keep the first-seen extremum on ties.
fn extrema_and_sum(samples: &[Gas]) -> (Gas, Gas, u128) {
    let mut min = samples[0];
    let mut max = samples[0];
    let mut sum: u128 = 0;

    for &gas in samples {
        if gas < min {
            min = gas;
        }
        if gas > max {
            max = gas;
        }
        sum = sum.wrapping_add(u128::from(gas));
    }

    (min, max, sum)
}

fn fixed_from_sum(sum: u128) -> FixedNumber {
    FixedNumber::from_integer(sum as i128)
}

fn median(samples: &[Gas]) -> Median {
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();

    let len = sorted.len();
    if len % 2 == 0 {
        let mid1 = FixedNumber::from_gas(sorted[len / 2 - 1]);
        let mid2 = FixedNumber::from_gas(sorted[len / 2]);
        Median::Averaged(mid1.add_unsafe(mid2).div_unsafe(FixedNumber::TWO))
    } else {
        Median::Exact(sorted[len / 2])
    }
}
