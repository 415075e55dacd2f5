//! Clause (implicant) representation
//!
//! A clause is a conjunction of literals. Each bit position is either
//! required to be 1, required to be 0, or left as don't care. The two
//! required sets are stored as disjoint masks so that testing a point is
//! `bits & pos == pos && bits & neg == 0`.

use super::error::MinimizeError;
use super::vector::{width_mask, BitVector};
use std::fmt;

/// Required polarity of a single bit within a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Bit must be 0
    Zero,
    /// Bit must be 1
    One,
    /// Bit is unconstrained
    DontCare,
}

impl Polarity {
    /// Parse a character into a polarity
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Polarity::Zero),
            '1' => Some(Polarity::One),
            '-' | 'x' | 'X' => Some(Polarity::DontCare),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Polarity::Zero => '0',
            Polarity::One => '1',
            Polarity::DontCare => '-',
        }
    }
}

/// A product term over up to 32 Boolean variables
///
/// Invariant: `pos & neg == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Clause {
    pos: u32,
    neg: u32,
}

impl Clause {
    /// Build a clause from its masks, rejecting overlapping ones
    pub fn from_masks(pos: u32, neg: u32) -> Result<Self, MinimizeError> {
        let overlap = pos & neg;
        if overlap != 0 {
            return Err(MinimizeError::OverlappingMasks { pos, neg, overlap });
        }
        Ok(Clause { pos, neg })
    }

    /// The clause that covers exactly one point of a `width`-bit space
    pub fn from_minterm(bits: u32, width: u32) -> Self {
        let mask = width_mask(width);
        Clause {
            pos: bits & mask,
            neg: !bits & mask,
        }
    }

    /// The clause that covers exactly one vectorized code point
    pub fn from_vector(v: BitVector) -> Self {
        Self::from_minterm(v.bits(), super::vector::WIDTH)
    }

    /// Parse a clause written most significant bit first, e.g. `"0-1"`
    pub fn parse(pattern: &str) -> Result<Self, MinimizeError> {
        let width = pattern.chars().count() as u32;
        if width == 0 || width > 32 {
            return Err(MinimizeError::InvalidWidth(width));
        }
        let mut pos = 0;
        let mut neg = 0;
        for (i, c) in pattern.chars().rev().enumerate() {
            match Polarity::from_char(c) {
                Some(Polarity::One) => pos |= 1u32 << i,
                Some(Polarity::Zero) => neg |= 1u32 << i,
                Some(Polarity::DontCare) => {}
                None => return Err(MinimizeError::InvalidPattern(pattern.to_string())),
            }
        }
        Ok(Clause { pos, neg })
    }

    /// Bits required to be 1
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Bits required to be 0
    pub fn neg(&self) -> u32 {
        self.neg
    }

    /// Bits constrained either way
    pub fn care_mask(&self) -> u32 {
        self.pos | self.neg
    }

    /// Unconstrained bits within a `width`-bit space
    pub fn dont_care_mask(&self, width: u32) -> u32 {
        !self.care_mask() & width_mask(width)
    }

    /// Polarity of bit `i`
    pub fn polarity(&self, i: u32) -> Polarity {
        if self.pos >> i & 1 == 1 {
            Polarity::One
        } else if self.neg >> i & 1 == 1 {
            Polarity::Zero
        } else {
            Polarity::DontCare
        }
    }

    /// Number of literals
    pub fn literal_count(&self) -> u32 {
        self.care_mask().count_ones()
    }

    /// Number of points covered within a `width`-bit space
    pub fn covered_size(&self, width: u32) -> u64 {
        1u64 << self.dont_care_mask(width).count_ones()
    }

    /// Whether a point satisfies every literal
    pub fn matches(&self, bits: u32) -> bool {
        bits & self.pos == self.pos && bits & self.neg == 0
    }

    /// Whether every point of `other` is covered by `self`
    pub fn contains(&self, other: &Clause) -> bool {
        self.pos & other.pos == self.pos && self.neg & other.neg == self.neg
    }

    /// Bit at which two clauses with the same don't-care set differ
    ///
    /// Returns the single-bit mask when the clauses constrain the same bits
    /// and disagree on exactly one of them.
    pub fn merge_position(&self, other: &Clause) -> Option<u32> {
        if self.care_mask() != other.care_mask() {
            return None;
        }
        let diff = self.pos ^ other.pos;
        if diff.count_ones() == 1 {
            Some(diff)
        } else {
            None
        }
    }

    /// Drop the literal at `bit`
    pub fn merge(&self, bit: u32) -> Clause {
        Clause {
            pos: self.pos & !bit,
            neg: self.neg & !bit,
        }
    }

    /// Every point covered within a `width`-bit space, in ascending order
    pub fn points(&self, width: u32) -> impl Iterator<Item = u32> {
        let free = self.dont_care_mask(width);
        let base = self.pos;
        // Walk the submasks of `free` upwards
        let mut next = Some(0u32);
        std::iter::from_fn(move || {
            let current = next?;
            let step = (current | !free).wrapping_add(1) & free;
            next = if step == 0 { None } else { Some(step) };
            Some(base | current)
        })
    }

    /// Most significant bit first rendering over `width` bits
    pub fn pattern(&self, width: u32) -> String {
        (0..width).rev().map(|i| self.polarity(i).to_char()).collect()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern(32))
    }
}
