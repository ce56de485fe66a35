#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(missing_docs)]
//! Library entry for riskfx.
//!
//! Deterministic fixed-point risk parameters for an AMM-adjacent protocol,
//! encoded for contracts that read a single big-endian 256-bit word.
//!
//! # Modules
//! - [`alpha`]: alphaX arbitrage-loss bound from reserve snapshots
//! - [`divergence`]: divergence between two spot prices (128.128)
//! - [`logistic`]: guarded logistic fee curve (64.64)
//! - [`word`]: fixed-point scaling and ABI word encoding
//! - [`verifier`]: sweep checks over the fee curve
//! - [`plot`]: Visualization (optional in binaries)

/// Error type for every fixed-point routine
pub mod error;

/// Fixed-point scaling and 32-byte word encoding
pub mod word;

/// alphaX bound from snapshot and execution reserves
pub mod alpha;

/// Spot price divergence
pub mod divergence;

/// Logistic fee curve and its overflow guards
pub mod logistic;

/// Verification tools for the fee curve
pub mod verifier;

/// Visualization utilities for generating charts
pub mod plot;

pub use alpha::{alpha_x, alpha_x_reserves, alpha_x_word, ReservePair};
pub use divergence::{price_divergence, price_divergence_hex};
pub use error::MathError;
pub use logistic::{logistic_fee_hex, logistic_fee_x64, CurveRegion, LogisticFeeParams};
