//! Verification sweep over the logistic fee curve

use crate::logistic::{CurveRegion, LogisticFeeParams};
use anyhow::{anyhow, Result};
use primitive_types::U256;

/// Verification report for one sweep of the curve
#[derive(Debug)]
pub struct Report {
    /// Number of volumes evaluated
    pub samples: u64,
    /// Samples that went through the logistic branch
    pub logistic_samples: u64,
    /// Smallest encoded value seen
    pub min_word: U256,
    /// Largest encoded value seen
    pub max_word: U256,
    /// Whether the encoded fee never increased with volume
    pub monotone_ok: bool,
    /// Whether every logistic sample is at or above the clamp word
    pub clamp_is_floor: bool,
}

/// Evaluate the curve at 0, step, 2·step, … up to `max_volume` inclusive and
/// check that the encoded fee is non-increasing and bounded below by the clamp.
pub fn verify_logistic(params: &LogisticFeeParams, max_volume: u64, step: u64) -> Result<Report> {
    if step == 0 {
        return Err(anyhow!("step must be ≥ 1"));
    }
    let clamp = U256::from(params.clamp_word);

    let mut samples = 0u64;
    let mut logistic_samples = 0u64;
    let mut min_word = U256::max_value();
    let mut max_word = U256::zero();
    let mut prev: Option<U256> = None;
    let mut monotone_ok = true;
    let mut clamp_is_floor = true;

    let mut x = 0u64;
    loop {
        let xv = U256::from(x);
        let w = params.fee_x64(xv)?;
        if params.region(xv) == CurveRegion::Logistic {
            logistic_samples += 1;
            if w < clamp { clamp_is_floor = false; }
        }
        if let Some(p) = prev {
            if w > p { monotone_ok = false; }
        }
        min_word = min_word.min(w);
        max_word = max_word.max(w);
        prev = Some(w);
        samples += 1;

        match x.checked_add(step) {
            Some(next) if next <= max_volume => x = next,
            _ => break,
        }
    }

    Ok(Report { samples, logistic_samples, min_word, max_word, monotone_ok, clamp_is_floor })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_curve_passes() {
        let rep = verify_logistic(&LogisticFeeParams::default(), 1_200_000, 1_000).unwrap();
        assert_eq!(rep.samples, 1_201);
        assert_eq!(rep.logistic_samples, 1_000);
        assert!(rep.monotone_ok);
        assert!(rep.clamp_is_floor);
        assert_eq!(rep.min_word, U256::from(18_446_744_073_709_552u64));
        assert_eq!(rep.max_word, U256::from(92_233_720_368_547_760u64));
    }

    #[test]
    fn zero_step_is_an_error() {
        assert!(verify_logistic(&LogisticFeeParams::default(), 10, 0).is_err());
    }
}
