use ethnum::I256;

use crate::fixed::FixedNumber;

/// `10^9`: half of the fixed-point exponent, removed after taking the root.
const SCALE_CORRECTION: FixedNumber =
    FixedNumber::from_raw(I256::new(1_000_000_000_000_000_000_000_000_000));

/// Descent-based approximate square root.
///
/// The input's raw mantissa is first reinterpreted as a whole number, so the
/// loop operates on `value * 10^18` and the root comes out `10^9` too large;
/// the final division by `10^9` corrects that.
///
/// The iteration only ever descends: it starts at `(x + 1) / 2` and stops at
/// the first step that fails to decrease. That settles on the truncated root
/// without an epsilon threshold. Results depend on this exact update order.
pub fn descent_sqrt(value: FixedNumber) -> FixedNumber {
    let x = value.reinterpret_as_units();
    let mut z = x.add_unsafe(FixedNumber::ONE).div_unsafe(FixedNumber::TWO);
    let mut y = x;

    while z.sub_unsafe(y).is_negative() {
        y = z;
        z = x.div_unsafe(z).add_unsafe(z).div_unsafe(FixedNumber::TWO);
    }

    y.div_unsafe(SCALE_CORRECTION)
}
