//! Fixed-point decimal arithmetic with 18 fractional digits.
//!
//! Values are stored as a signed 256-bit mantissa scaled by `10^18`, the
//! `fixed128x18` convention used by on-chain tooling. Every operation is
//! "unsafe" in that convention's sense: overflow wraps, multiplication and
//! division truncate toward zero, and nothing is validated.
//!
//! Multiplication and division never materialize the widened intermediate
//! product, so a result is exact whenever it fits in 256 bits. Only results
//! outside that range wrap. Statistics over `u64` gas samples stay below
//! 2^247 at every step.

use std::fmt;
use std::str::FromStr;

use ethnum::{I256, U256};
use thiserror::Error;

/// Number of fractional decimal digits.
pub const DECIMALS: usize = 18;

const SCALE: I256 = I256::new(1_000_000_000_000_000_000);
const SCALE_UNSIGNED: U256 = U256::new(1_000_000_000_000_000_000);

/// Errors from parsing a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFixedError {
    #[error("invalid decimal string: {0:?}")]
    Invalid(String),
    #[error("fractional component exceeds 18 digits: {0:?}")]
    TooManyDecimals(String),
}

/// A decimal number with a fixed number of fractional digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedNumber {
    value: I256,
}

impl FixedNumber {
    pub const ZERO: Self = Self { value: I256::ZERO };
    pub const ONE: Self = Self { value: SCALE };
    pub const TWO: Self = Self {
        value: I256::new(2_000_000_000_000_000_000),
    };

    /// Build from a raw mantissa already scaled by `10^18`.
    pub const fn from_raw(value: I256) -> Self {
        Self { value }
    }

    /// The raw mantissa, scaled by `10^18`.
    pub const fn raw(self) -> I256 {
        self.value
    }

    /// A whole number of units.
    pub fn from_integer(units: i128) -> Self {
        Self::from_units(I256::new(units))
    }

    /// A gas counter as a whole number of units.
    pub fn from_gas(gas: u64) -> Self {
        Self::from_integer(i128::from(gas))
    }

    fn from_units(units: I256) -> Self {
        Self {
            value: units.wrapping_mul(SCALE),
        }
    }

    /// Treat the raw mantissa as a whole number of units.
    ///
    /// The result is `10^18` times larger than `self`. Taking a square root
    /// of it yields `10^9` times the real root, which callers divide back out.
    pub fn reinterpret_as_units(self) -> Self {
        Self::from_units(self.value)
    }

    pub fn add_unsafe(self, other: Self) -> Self {
        Self {
            value: self.value.wrapping_add(other.value),
        }
    }

    pub fn sub_unsafe(self, other: Self) -> Self {
        Self {
            value: self.value.wrapping_sub(other.value),
        }
    }

    pub fn mul_unsafe(self, other: Self) -> Self {
        let lhs = self.value.unsigned_abs();
        let rhs = other.value.unsigned_abs();

        // (q * S + r) * rhs / S == q * rhs + r * rhs / S
        let whole = (lhs / SCALE_UNSIGNED).wrapping_mul(rhs);
        let fraction = (lhs % SCALE_UNSIGNED).wrapping_mul(rhs) / SCALE_UNSIGNED;

        Self::with_sign(
            whole.wrapping_add(fraction),
            self.is_negative() != other.is_negative(),
        )
    }

    /// # Panics
    /// Panics if `other` is zero.
    pub fn div_unsafe(self, other: Self) -> Self {
        let quotient = scaled_quotient(self.value.unsigned_abs(), other.value.unsigned_abs());
        Self::with_sign(quotient, self.is_negative() != other.is_negative())
    }

    fn with_sign(magnitude: U256, negative: bool) -> Self {
        let value = magnitude.as_i256();
        Self {
            value: if negative { value.wrapping_neg() } else { value },
        }
    }

    pub fn abs(self) -> Self {
        Self {
            value: self.value.wrapping_abs(),
        }
    }

    pub fn is_negative(self) -> bool {
        self.value.is_negative()
    }

    pub fn is_zero(self) -> bool {
        self.value == I256::ZERO
    }
}

/// `dividend * 10^18 / divisor`, truncated, by decimal long division.
///
/// The remainder stays below `divisor`, so only `divisor * 10` has to fit.
fn scaled_quotient(dividend: U256, divisor: U256) -> U256 {
    let ten = U256::new(10);
    let mut quotient = dividend / divisor;
    let mut remainder = dividend % divisor;

    for _ in 0..DECIMALS {
        remainder = remainder.wrapping_mul(ten);
        quotient = quotient.wrapping_mul(ten).wrapping_add(remainder / divisor);
        remainder %= divisor;
    }

    quotient
}

impl fmt::Display for FixedNumber {
    /// Shortest form with at least one fractional digit, e.g. `200.0` or `2.5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.value.unsigned_abs();
        let whole = magnitude / SCALE_UNSIGNED;
        let fraction = (magnitude % SCALE_UNSIGNED).to_string();
        let fraction = format!("{:0>width$}", fraction, width = DECIMALS);
        let fraction = fraction.trim_end_matches('0');
        let fraction = if fraction.is_empty() { "0" } else { fraction };

        let sign = if self.value.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{}", sign, whole, fraction)
    }
}

impl FromStr for FixedNumber {
    type Err = ParseFixedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseFixedError::Invalid(s.to_string());

        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > DECIMALS {
            return Err(ParseFixedError::TooManyDecimals(s.to_string()));
        }

        let digits = format!("{}{:0<width$}", whole, fraction, width = DECIMALS);
        let mut value = I256::from_str_radix(&digits, 10).map_err(|_| invalid())?;
        if negative {
            value = value.wrapping_neg();
        }

        Ok(Self { value })
    }
}
