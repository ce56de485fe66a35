//! Arbitrage-loss bound (alphaX) from constant-product reserve snapshots

use crate::error::{MathError, Result};
use crate::word::{from_f64_truncated, Q64_F64};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Reserves of a constant-product pool at one point in time
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReservePair {
    /// Balance of token 0
    pub reserve0: f64,
    /// Balance of token 1
    pub reserve1: f64,
}
impl ReservePair {
    /// Builds a pair without validation; see [`ReservePair::validate`]
    pub fn new(reserve0: f64, reserve1: f64) -> Self { Self { reserve0, reserve1 } }
    /// Spot price reserve0 / reserve1
    pub fn spot(&self) -> f64 { self.reserve0 / self.reserve1 }
    /// Constant-product invariant k = reserve0 * reserve1
    pub fn invariant(&self) -> f64 { self.reserve0 * self.reserve1 }
    /// Both reserves must be finite and strictly positive
    pub fn validate(&self, label: &str) -> Result<()> {
        for (name, r) in [("reserve0", self.reserve0), ("reserve1", self.reserve1)] {
            if !r.is_finite() || r <= 0.0 {
                return Err(MathError::domain(format!(
                    "{label} {name} must be finite and > 0 (got {r})"
                )));
            }
        }
        Ok(())
    }
}

/// alphaX in 64.64 fixed point, returned as a real number (not encoded).
///
/// With δ = |spot_exec / spot_snap − 1| and k = r0·r1 at the snapshot:
/// `((√k · √r0 · √(δ·r1 + r1) − k) / r1) · 2^64`.
pub fn alpha_x(snapshot: ReservePair, execution: ReservePair) -> Result<f64> {
    snapshot.validate("snapshot")?;
    execution.validate("execution")?;

    let delta = (execution.spot() / snapshot.spot() - 1.0).abs();
    let k = snapshot.invariant();
    let numerator = k.sqrt()
        * snapshot.reserve0.sqrt()
        * (delta * snapshot.reserve1 + snapshot.reserve1).sqrt()
        - k;
    let alpha = (numerator / snapshot.reserve1) * Q64_F64;
    trace!(delta, k, alpha, "alphaX");

    if !alpha.is_finite() {
        return Err(MathError::domain(format!(
            "alphaX left the finite range (delta={delta}, k={k})"
        )));
    }
    Ok(alpha)
}

/// Four-reserve form of [`alpha_x`], in snapshot-then-execution order
pub fn alpha_x_reserves(
    reserve0_snapshot: f64,
    reserve1_snapshot: f64,
    reserve0_execution: f64,
    reserve1_execution: f64,
) -> Result<f64> {
    alpha_x(
        ReservePair::new(reserve0_snapshot, reserve1_snapshot),
        ReservePair::new(reserve0_execution, reserve1_execution),
    )
}

/// alphaX truncated to an unsigned word.
///
/// When the spot did not move, rounding in k can leave alphaX a hair below
/// zero; that case returns [`MathError::NegativeValue`] even though the
/// reserves are valid. Callers that need the sign use [`alpha_x`].
pub fn alpha_x_word(snapshot: ReservePair, execution: ReservePair) -> Result<U256> {
    // already scaled by 2^64
    from_f64_truncated(alpha_x(snapshot, execution)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn spot_and_invariant() {
        let p = ReservePair::new(200.0, 50.0);
        assert_eq!(p.spot(), 4.0);
        assert_eq!(p.invariant(), 10_000.0);
    }

    #[test]
    fn known_divergence() {
        // spot moves 1.0 -> 1.21, so sqrt(1 + δ) = 1.1 and alphaX = r0 * 0.1 * 2^64
        let a = alpha_x_reserves(100.0, 100.0, 121.0, 100.0).unwrap();
        assert_relative_eq!(a, 10.0 * Q64_F64, max_relative = 1e-12);
    }

    #[test]
    fn downward_move_uses_magnitude() {
        // spot 1.0 -> 0.79 gives the same δ = 0.21 as an upward move
        let a = alpha_x_reserves(100.0, 100.0, 79.0, 100.0).unwrap();
        assert_relative_eq!(a, 10.0 * Q64_F64, max_relative = 1e-12);
    }

    #[test]
    fn rejects_bad_reserves() {
        assert!(alpha_x_reserves(0.0, 1.0, 1.0, 1.0).is_err());
        assert!(alpha_x_reserves(1.0, -1.0, 1.0, 1.0).is_err());
        assert!(alpha_x_reserves(1.0, 1.0, 1.0, f64::NAN).is_err());
        let err = alpha_x_reserves(1.0, 1.0, 1.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("execution reserve1"));
    }

    #[test]
    fn overflowing_invariant_is_rejected() {
        // k = 1e600 overflows to inf and inf - inf is NaN
        let err = alpha_x_reserves(1e300, 1e300, 1e300, 1e300).unwrap_err();
        assert!(matches!(err, MathError::InvalidDomainInput(_)));
        assert!(err.to_string().contains("finite range"));
    }

    #[test]
    fn word_form_matches_real_form() {
        let s = ReservePair::new(100.0, 100.0);
        let e = ReservePair::new(121.0, 100.0);
        let w = alpha_x_word(s, e).unwrap();
        let a = alpha_x(s, e).unwrap();
        assert_eq!(w, from_f64_truncated(a).unwrap());
        // within a few parts in 1e12 of 10 * 2^64
        let expected = U256::from(10u64) << 64;
        let gap = if w > expected { w - expected } else { expected - w };
        assert!(gap < U256::from(1u64) << 30);
    }
}
