//! Error types for the minimizer

use thiserror::Error;

/// Errors raised while vectorizing, minimizing or verifying a predicate.
///
/// Apart from `OutOfDomain` and `OutOfWidth`, every variant means the
/// minimizer itself produced something wrong. Generation must stop rather
/// than emit an incorrect predicate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MinimizeError {
    /// A code point does not fit the 16-bit domain
    #[error("code point U+{code_point:04X} is outside the 16-bit domain")]
    OutOfDomain { code_point: u32 },

    /// A raw minterm has bits set above the configured width
    #[error("minterm {bits:#b} does not fit in {width} bits")]
    OutOfWidth { bits: u32, width: u32 },

    /// Width must be between 1 and 32
    #[error("invalid vector width {0}, expected 1..=32")]
    InvalidWidth(u32),

    /// A clause pattern contains something other than `0`, `1` or `-`
    #[error("invalid clause pattern '{0}'")]
    InvalidPattern(String),

    /// A clause requires the same bit to be both 1 and 0
    #[error("clause requires bits {overlap:#034b} to be both 1 and 0 (pos={pos:#034b}, neg={neg:#034b})")]
    OverlappingMasks { pos: u32, neg: u32, overlap: u32 },

    /// No prime implicant covers a minterm
    #[error("minterm {0:#b} is not covered by any prime implicant")]
    Uncovered(u32),

    /// The selected cover disagrees with the on-set
    #[error("cover is inexact at {bits:#b}: expected {expected}, clauses say {actual}")]
    InexactCover {
        bits: u32,
        expected: bool,
        actual: bool,
    },

    /// A point outside the range guard satisfies a clause
    #[error("range guard is unsound: U+{code_point:04X} lies outside [{min:#X}, {max:#X}] but matches a clause")]
    UnsoundRangeGuard { code_point: u32, min: u32, max: u32 },

    /// A clause leaves padding bits unconstrained
    #[error("clause pos={pos:#034b} neg={neg:#034b} does not pin the padding bits to zero")]
    UnpinnedPadding { pos: u32, neg: u32 },

    /// The assembled predicate disagrees with direct membership
    #[error("predicate mismatch at U+{code_point:04X}: expected {expected}, got {actual}")]
    PredicateMismatch {
        code_point: u32,
        expected: bool,
        actual: bool,
    },
}
