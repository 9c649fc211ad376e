//! Numeric-literal formatting.

use crate::error::{BurnishError, BurnishResult};

/// Formats a finite `f64` as an ECMAScript numeric literal.
///
/// The output is the shortest decimal string that parses back to exactly
/// `value` (Rust's `f64` `Display` guarantee), written positionally, so it
/// is always a valid ECMAScript-3 literal. Both `+0.0` and `-0.0` print as
/// `0`.
///
/// Returns [`BurnishError::PayloadOutOfRange`] for NaN and ±∞: those have
/// no literal form and must be materialized as expressions (`0/0`, `1/0`)
/// by whoever built the tree.
pub fn number_to_literal(value: f64) -> BurnishResult<String> {
    if !value.is_finite() {
        return Err(BurnishError::PayloadOutOfRange(value));
    }
    if value == 0.0 {
        return Ok("0".to_string());
    }
    Ok(value.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
