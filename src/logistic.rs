//! Logistic fee curve with overflow guards, encoded in 64.64 fixed point

use crate::error::{MathError, Result};
use crate::word::{encode_x64, to_hex, Q64_F64};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::f64::consts::E;
use tracing::debug;

/// Which branch of the curve evaluated an input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveRegion {
    /// Input at or past the volume cap; clamped
    VolumeCap,
    /// Exponent argument at or past the fixed-point ceiling; clamped before e^x
    ExponentCeiling,
    /// Evaluated through the logistic formula
    Logistic,
}

impl CurveRegion {
    /// Short label used in tables and logs
    pub fn label(&self) -> &'static str {
        match self {
            CurveRegion::VolumeCap => "volume_cap",
            CurveRegion::ExponentCeiling => "exponent_ceiling",
            CurveRegion::Logistic => "logistic",
        }
    }
}

/// Logistic fee schedule in *decimal* space, encoded to 64.64 at the end.
///
/// fee(x) = amplitude / (offset + e^(x/decay)) + floor, then divided by
/// `percent_scale`. Starts at 0.5 for x = 0 and decays toward `floor`.
/// Both clamps return `clamp_word` as-is; it is not recomputed from the formula.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogisticFeeParams {
    /// Volume per e-fold of the exponential term
    pub decay: f64,
    /// Constant added to the exponential in the denominator
    pub offset: f64,
    /// Numerator of the logistic term
    pub amplitude: f64,
    /// Asymptotic fee as volume grows
    pub floor: f64,
    /// Divisor turning the fee into a fractional-percent value
    pub percent_scale: f64,
    /// Inputs at or above this are clamped without evaluating the curve
    pub volume_cap: u64,
    /// Clamp when (x/decay) * 2^64 reaches this value
    pub exponent_ceiling: u128,
    /// Encoded 64.64 result returned by both clamps
    pub clamp_word: u64,
}

impl Default for LogisticFeeParams {
    fn default() -> Self {
        Self {
            decay: 75_000.0,
            offset: 1.25,
            amplitude: 0.9,
            floor: 0.1,
            percent_scale: 100.0,
            volume_cap: 1_000_000,
            exponent_ceiling: 0x400000000000000000,
            clamp_word: 18_446_744_073_709_552,
        }
    }
}

impl LogisticFeeParams {
    /// Rejects parameter sets that make the formula meaningless.
    pub fn validate(&self) -> Result<()> {
        if !self.decay.is_finite() || self.decay <= 0.0 {
            return Err(MathError::domain(format!("decay must be finite and > 0 (got {})", self.decay)));
        }
        if !self.percent_scale.is_finite() || self.percent_scale <= 0.0 {
            return Err(MathError::domain(format!(
                "percent_scale must be finite and > 0 (got {})",
                self.percent_scale
            )));
        }
        if !(self.offset.is_finite() && self.amplitude.is_finite() && self.floor.is_finite()) {
            return Err(MathError::domain("offset, amplitude and floor must be finite"));
        }
        if self.offset < 0.0 {
            return Err(MathError::domain(format!("offset must be >= 0 (got {})", self.offset)));
        }
        Ok(())
    }

    /// Picks the branch for `x`. Guards run in order, the volume cap first;
    /// the ceiling check happens before any exponential is computed.
    pub fn region(&self, x: U256) -> CurveRegion {
        if x >= U256::from(self.volume_cap) {
            return CurveRegion::VolumeCap;
        }
        // below the cap, so x fits in a u64
        if (x.low_u64() as f64 / self.decay) * Q64_F64 >= self.exponent_ceiling as f64 {
            return CurveRegion::ExponentCeiling;
        }
        CurveRegion::Logistic
    }

    /// Unscaled fee at volume `x`, with no guards applied
    pub fn fee(&self, x: f64) -> f64 {
        self.amplitude / (self.offset + E.powf(x / self.decay)) + self.floor
    }

    /// Fee at `x` as a 64.64 value: the clamp word past either guard,
    /// otherwise `trunc(fee(x) / percent_scale * 2^64)`.
    pub fn fee_x64(&self, x: U256) -> Result<U256> {
        self.validate()?;
        match self.region(x) {
            region @ (CurveRegion::VolumeCap | CurveRegion::ExponentCeiling) => {
                debug!(%x, region = region.label(), "fee clamped");
                Ok(U256::from(self.clamp_word))
            }
            CurveRegion::Logistic => {
                let fee = self.fee(x.low_u64() as f64);
                let adjusted = fee / self.percent_scale;
                debug!(%x, fee, adjusted, "fee evaluated");
                encode_x64(adjusted)
            }
        }
    }
}

/// [`LogisticFeeParams::fee_x64`] with the default schedule
pub fn logistic_fee_x64(x: U256) -> Result<U256> {
    LogisticFeeParams::default().fee_x64(x)
}

/// [`logistic_fee_x64`] rendered as a `0x`-prefixed ABI word
pub fn logistic_fee_hex(x: U256) -> Result<String> {
    logistic_fee_x64(x).map(to_hex)
}
