//! Fixed-point scaling and 32-byte ABI word encoding

use crate::error::{MathError, Result};
use primitive_types::U256;

/// 2^64 as a binary64 value (exact).
pub const Q64_F64: f64 = 18_446_744_073_709_551_616.0;

/// Byte width of an ABI word.
pub const WORD_BYTES: usize = 32;

/// 2^64, the unit of a 64.64 value.
pub fn q64() -> U256 { U256::one() << 64 }

/// 2^128, the unit of a 128.128 value.
pub fn q128() -> U256 { U256::one() << 128 }

/// Converts a non-negative finite `f64` to an integer, truncating toward zero.
///
/// The conversion reads the mantissa and exponent directly, so every integer
/// a binary64 can hold comes out exact. Values of 2^256 or more are rejected
/// instead of wrapping.
pub fn from_f64_truncated(v: f64) -> Result<U256> {
    if !v.is_finite() {
        return Err(MathError::domain(format!("non-finite value {v}")));
    }
    if v < 0.0 {
        return Err(MathError::NegativeValue(format!("{v:e}")));
    }
    if v < 1.0 {
        return Ok(U256::zero());
    }
    let bits = v.to_bits();
    let exp = ((bits >> 52) & 0x7ff) as i32 - 1075;
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);
    if exp >= 0 {
        if exp as usize + 53 > 256 {
            return Err(MathError::EncodingOverflow(format!("{v:e}")));
        }
        Ok(U256::from(mantissa) << exp as usize)
    } else {
        // v >= 1 bounds the shift to at most 52
        Ok(U256::from(mantissa >> (-exp) as u32))
    }
}

/// Encodes a real number as 64.64 fixed point: `trunc(real * 2^64)`.
pub fn encode_x64(real: f64) -> Result<U256> {
    from_f64_truncated(real * Q64_F64)
}

/// Big-endian 32-byte ABI word.
pub fn to_word(value: U256) -> [u8; WORD_BYTES] {
    let mut out = [0u8; WORD_BYTES];
    value.to_big_endian(&mut out);
    out
}

/// `0x` followed by 64 lowercase hex characters.
pub fn to_hex(value: U256) -> String {
    format!("0x{}", hex::encode(to_word(value)))
}

/// Decodes a word produced by [`to_hex`]. The `0x` prefix is optional.
pub fn from_hex(s: &str) -> Result<U256> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.len() != 2 * WORD_BYTES {
        return Err(MathError::MalformedWord(format!(
            "expected {} hex digits, got {}",
            2 * WORD_BYTES,
            digits.len()
        )));
    }
    let bytes = hex::decode(digits).map_err(|e| MathError::MalformedWord(e.to_string()))?;
    Ok(U256::from_big_endian(&bytes))
}

/// Parses a non-negative decimal integer argument.
pub fn parse_uint(name: &str, s: &str) -> Result<U256> {
    let t = s.trim();
    if t.starts_with('-') {
        return Err(MathError::domain(format!("{name} must not be negative (got {t})")));
    }
    let t = t.strip_prefix('+').unwrap_or(t);
    U256::from_dec_str(t)
        .map_err(|e| MathError::domain(format!("{name} is not a 256-bit decimal integer ({t}): {e:?}")))
}

/// Parses a non-negative decimal integer, saturating at `U256::MAX`.
///
/// For inputs whose magnitude only matters up to a cap (the fee curve clamps
/// long before 2^256). Signs and non-digits are still rejected.
pub fn parse_uint_saturating(name: &str, s: &str) -> Result<U256> {
    let t = s.trim();
    if t.starts_with('-') {
        return Err(MathError::domain(format!("{name} must not be negative (got {t})")));
    }
    let t = t.strip_prefix('+').unwrap_or(t);
    if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MathError::domain(format!("{name} is not a decimal integer ({t})")));
    }
    // only digits left, so the sole failure is overflow
    Ok(U256::from_dec_str(t).unwrap_or_else(|_| U256::max_value()))
}

/// Parses a strictly positive decimal integer argument.
pub fn parse_positive(name: &str, s: &str) -> Result<U256> {
    let v = parse_uint(name, s)?;
    if v.is_zero() {
        return Err(MathError::domain(format!("{name} must be > 0 (got 0)")));
    }
    Ok(v)
}
