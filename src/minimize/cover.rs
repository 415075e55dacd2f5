//! Cover representation - a collection of clauses
//!
//! A cover represents a Boolean function as a sum of products. The function
//! is the OR of all clauses in the cover.

use super::clause::Clause;
use super::error::MinimizeError;
use super::minterms::MintermSet;
use std::fmt;

/// A sum-of-products over `width` variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    clauses: Vec<Clause>,
    width: u32,
}

impl Cover {
    /// Create an empty cover (the constant false function)
    pub fn new(width: u32) -> Self {
        Cover {
            clauses: Vec::new(),
            width,
        }
    }

    /// Create a cover from a vector of clauses
    pub fn from_clauses(clauses: Vec<Clause>, width: u32) -> Self {
        Cover { clauses, width }
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Total literal count
    pub fn literal_count(&self) -> u32 {
        self.clauses.iter().map(|c| c.literal_count()).sum()
    }

    /// Evaluate the function at a point
    pub fn matches(&self, bits: u32) -> bool {
        self.clauses.iter().any(|c| c.matches(bits))
    }

    /// Check that the cover reproduces `minterms` exactly
    ///
    /// Every minterm must be matched, and no clause may cover a point
    /// outside the on-set. The second half walks each clause's covered
    /// points, stopping at the first stray one, so it stays bounded by the
    /// on-set size even in a 32-bit space.
    pub fn verify_exact(&self, minterms: &MintermSet) -> Result<(), MinimizeError> {
        for clause in &self.clauses {
            Clause::from_masks(clause.pos(), clause.neg())?;
        }

        for m in minterms.iter() {
            if !self.matches(m) {
                return Err(MinimizeError::InexactCover {
                    bits: m,
                    expected: true,
                    actual: false,
                });
            }
        }

        for clause in &self.clauses {
            if let Some(stray) = clause.points(self.width).find(|&p| !minterms.contains(p)) {
                return Err(MinimizeError::InexactCover {
                    bits: stray,
                    expected: false,
                    actual: true,
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Cover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clause in &self.clauses {
            writeln!(f, "{}", clause.pattern(self.width))?;
        }
        Ok(())
    }
}

impl IntoIterator for Cover {
    type Item = Clause;
    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl<'a> IntoIterator for &'a Cover {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}
