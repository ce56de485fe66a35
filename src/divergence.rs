//! Normalized divergence between two scaled spot prices

use crate::error::{MathError, Result};
use crate::word::{q128, to_hex};
use primitive_types::U256;
use tracing::debug;

/// `2^128 − lo/hi`, truncated toward zero, with `lo`/`hi` the smaller and larger
/// input.
///
/// The ratio is taken as an exact rational and subtracted before truncating,
/// so the result is `2^128 − ceil(lo/hi)`. Arguments may come in either order.
pub fn price_divergence(v3_spot: U256, v2_outlier: U256) -> Result<U256> {
    if v3_spot.is_zero() {
        return Err(MathError::domain("v3_spot must be > 0"));
    }
    if v2_outlier.is_zero() {
        return Err(MathError::domain("v2_outlier must be > 0"));
    }
    let (lo, hi) = if v3_spot > v2_outlier { (v2_outlier, v3_spot) } else { (v3_spot, v2_outlier) };

    // lo/hi lies in (0, 1], so its ceiling is always 1
    let (quot, rem) = lo.div_mod(hi);
    let ratio_ceil = if rem.is_zero() { quot } else { quot + U256::one() };
    let divergence = q128() - ratio_ceil;
    debug!(%v3_spot, %v2_outlier, %divergence, "price divergence");
    Ok(divergence)
}

/// [`price_divergence`] rendered as a `0x`-prefixed ABI word
pub fn price_divergence_hex(v3_spot: U256, v2_outlier: U256) -> Result<String> {
    price_divergence(v3_spot, v2_outlier).map(to_hex)
}
