//! Error types for the Burnish core library.

use thiserror::Error;

/// All errors that can be produced while operating on a syntax tree.
///
/// Trees are constructed programmatically, so the taxonomy is narrow:
/// every variant reports a malformed tree or payload reaching the printer.
/// Reduction never fails; a tree that violates its construction invariants
/// is a programmer error there.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BurnishError {
    /// A node reached the printer with fewer children than its variant
    /// requires.
    #[error("{kind} node has {found} children, expected at least {expected}")]
    StructuralViolation {
        /// Variant name of the offending node.
        kind: &'static str,
        /// Minimum child count the variant's grammar requires.
        expected: usize,
        /// Child count actually present.
        found: usize,
    },

    /// A numeric literal holds a non-finite value (NaN or ±∞).
    ///
    /// The numeric formatter's contract covers only finite doubles; callers
    /// must materialize non-finite values as expressions (`1/0`, `0/0`)
    /// rather than literals.
    #[error("numeric literal {0} is not finite")]
    PayloadOutOfRange(f64),

    /// A child slot that the variant's grammar requires to be filled holds
    /// the absent sentinel.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenient `Result` alias for fallible tree operations.
pub type BurnishResult<T> = Result<T, BurnishError>;
