//! Vectorizer: code points as fixed-width bit vectors
//!
//! Bit `i` of the vector is bit `i` of the code point. Only the low 16 bits
//! can ever be set; the remaining 16 are padding and stay zero, which is
//! what lets the generated clauses reject everything above `U+FFFF`.

use super::error::MinimizeError;
use std::fmt;

/// Width of every vector handed to the minimizer
pub const WIDTH: u32 = 32;

/// Number of bits a code point may actually use
pub const SIGNIFICANT_BITS: u32 = 16;

/// First code point outside the domain
pub const DOMAIN_END: u32 = 1 << SIGNIFICANT_BITS;

/// Bits that are always zero for an in-domain code point
pub const PADDING_MASK: u32 = !(DOMAIN_END - 1);

/// Mask of the low `width` bits
pub fn width_mask(width: u32) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

/// A code point viewed as a point in 32-dimensional Boolean space
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitVector(u32);

impl BitVector {
    /// Vectorize a code point, rejecting anything at or above `0x10000`
    pub fn from_code_point(code_point: u32) -> Result<Self, MinimizeError> {
        if code_point >= DOMAIN_END {
            return Err(MinimizeError::OutOfDomain { code_point });
        }
        Ok(BitVector(code_point))
    }

    /// Vectorize a `char`
    pub fn from_char(c: char) -> Result<Self, MinimizeError> {
        Self::from_code_point(u32::from(c))
    }

    /// Raw bits
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Value of bit `i`
    pub fn bit(self, i: u32) -> bool {
        i < WIDTH && (self.0 >> i) & 1 == 1
    }
}

impl From<BitVector> for u32 {
    fn from(v: BitVector) -> u32 {
        v.0
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032b}", self.0)
    }
}
