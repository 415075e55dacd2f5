//! Minterm set: the deduplicated on-set handed to the minimizer

use super::error::MinimizeError;
use super::vector::{width_mask, BitVector, WIDTH};
use std::collections::BTreeSet;

/// The on-set of a Boolean function over `width` variables
///
/// Points are kept ordered so every later stage iterates them in the same
/// order on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintermSet {
    width: u32,
    points: BTreeSet<u32>,
}

impl MintermSet {
    /// Create an empty on-set over `width` variables
    pub fn new(width: u32) -> Result<Self, MinimizeError> {
        if width == 0 || width > WIDTH {
            return Err(MinimizeError::InvalidWidth(width));
        }
        Ok(MintermSet {
            width,
            points: BTreeSet::new(),
        })
    }

    /// Build the 32-bit on-set for a collection of characters
    ///
    /// Characters listed more than once, or in several categories, collapse
    /// into a single minterm.
    pub fn from_chars<I>(chars: I) -> Result<Self, MinimizeError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut set = MintermSet::new(WIDTH)?;
        for c in chars {
            set.insert_vector(BitVector::from_char(c)?);
        }
        Ok(set)
    }

    /// Build an on-set from raw points
    pub fn from_points<I>(width: u32, points: I) -> Result<Self, MinimizeError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut set = MintermSet::new(width)?;
        for bits in points {
            set.insert(bits)?;
        }
        Ok(set)
    }

    /// Insert a raw point; returns whether it was new
    pub fn insert(&mut self, bits: u32) -> Result<bool, MinimizeError> {
        if bits & !width_mask(self.width) != 0 {
            return Err(MinimizeError::OutOfWidth {
                bits,
                width: self.width,
            });
        }
        Ok(self.points.insert(bits))
    }

    /// Insert a vectorized code point; returns whether it was new
    pub fn insert_vector(&mut self, v: BitVector) -> bool {
        // A BitVector always fits the full width
        self.points.insert(v.bits() & width_mask(self.width))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, bits: u32) -> bool {
        self.points.contains(&bits)
    }

    /// Smallest point, if any
    pub fn min(&self) -> Option<u32> {
        self.points.first().copied()
    }

    /// Largest point, if any
    pub fn max(&self) -> Option<u32> {
        self.points.last().copied()
    }

    /// Points in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.points.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let set = MintermSet::from_chars(['\u{0300}', '\u{0301}', '\u{0300}']).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.min(), Some(0x300));
        assert_eq!(set.max(), Some(0x301));
        assert_eq!(set.width(), 32);
    }

    #[test]
    fn test_out_of_domain_char() {
        let err = MintermSet::from_chars(['a', '\u{1F600}']).unwrap_err();
        assert_eq!(
            err,
            MinimizeError::OutOfDomain {
                code_point: 0x1F600
            }
        );
    }

    #[test]
    fn test_point_wider_than_width() {
        let mut set = MintermSet::new(3).unwrap();
        assert!(set.insert(0b111).unwrap());
        assert!(!set.insert(0b111).unwrap());
        assert!(set.insert(0b1000).is_err());
    }

    #[test]
    fn test_invalid_width() {
        assert_eq!(MintermSet::new(0), Err(MinimizeError::InvalidWidth(0)));
        assert_eq!(MintermSet::new(33), Err(MinimizeError::InvalidWidth(33)));
    }
}
