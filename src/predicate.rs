//! Membership predicate
//!
//! Turns a verified cover into masked bit tests behind a range guard and
//! checks the result against direct membership over the whole domain.

use crate::minimize::{
    Clause, Cover, MinimizeError, MintermSet, DOMAIN_END, PADDING_MASK, SIGNIFICANT_BITS, WIDTH,
};
use serde::Serialize;

/// A clause as the pair of masks the generated code tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClauseMask {
    /// Bits that must be set
    pub pos: u32,
    /// Bits that must be clear
    pub neg: u32,
}

impl ClauseMask {
    /// Translate a clause, refusing masks that overlap
    pub fn translate(clause: &Clause) -> Result<Self, MinimizeError> {
        let checked = Clause::from_masks(clause.pos(), clause.neg())?;
        Ok(ClauseMask {
            pos: checked.pos(),
            neg: checked.neg(),
        })
    }

    pub fn matches(&self, c: u32) -> bool {
        c & self.pos == self.pos && c & self.neg == 0
    }
}

/// The assembled decision function: a range guard plus an OR of clauses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predicate {
    range: Option<(u32, u32)>,
    masks: Vec<ClauseMask>,
}

impl Predicate {
    /// The predicate that accepts nothing
    pub fn never() -> Self {
        Predicate {
            range: None,
            masks: Vec::new(),
        }
    }

    /// Assemble and verify the predicate for `cover`, the minimized form of
    /// `minterms`
    pub fn assemble(minterms: &MintermSet, cover: &Cover) -> Result<Self, MinimizeError> {
        let masks = cover
            .iter()
            .map(ClauseMask::translate)
            .collect::<Result<Vec<_>, _>>()?;
        let range = minterms.min().zip(minterms.max());
        let predicate = Predicate { range, masks };
        predicate.verify(minterms)?;
        Ok(predicate)
    }

    /// Inclusive `(min, max)` of the on-set, `None` when it is empty
    pub fn range(&self) -> Option<(u32, u32)> {
        self.range
    }

    pub fn masks(&self) -> &[ClauseMask] {
        &self.masks
    }

    /// Whether `c` is a member
    pub fn is_member(&self, c: u32) -> bool {
        match self.range {
            Some((min, max)) if (min..=max).contains(&c) => self.matches_unguarded(c),
            _ => false,
        }
    }

    pub fn is_member_char(&self, c: char) -> bool {
        self.is_member(u32::from(c))
    }

    /// Evaluate the clauses without the range guard
    pub fn matches_unguarded(&self, c: u32) -> bool {
        self.masks.iter().any(|m| m.matches(c))
    }

    /// Check the predicate against direct membership
    ///
    /// Every point of the domain (all 65,536 code points for 32-bit
    /// vectors) must agree with `minterms`, and no point outside the range
    /// guard may satisfy a clause on its own. For 32-bit vectors every
    /// clause must also pin the padding bits to zero, which extends the
    /// result to code points above `U+FFFF`. Widths between 17 and 31 can
    /// be neither enumerated nor padded and are rejected.
    pub fn verify(&self, minterms: &MintermSet) -> Result<(), MinimizeError> {
        let width = minterms.width();
        if width > SIGNIFICANT_BITS && width != WIDTH {
            return Err(MinimizeError::InvalidWidth(width));
        }
        if width == WIDTH {
            let padding = PADDING_MASK;
            if let Some(m) = self.masks.iter().find(|m| m.neg & padding != padding) {
                return Err(MinimizeError::UnpinnedPadding {
                    pos: m.pos,
                    neg: m.neg,
                });
            }
        }

        let end = if width == WIDTH {
            DOMAIN_END
        } else {
            1 << width
        };
        for c in 0..end {
            let expected = minterms.contains(c);
            let actual = self.is_member(c);
            if expected != actual {
                return Err(MinimizeError::PredicateMismatch {
                    code_point: c,
                    expected,
                    actual,
                });
            }
            if let Some((min, max)) = self.range {
                if !(min..=max).contains(&c) && self.matches_unguarded(c) {
                    return Err(MinimizeError::UnsoundRangeGuard {
                        code_point: c,
                        min,
                        max,
                    });
                }
            }
        }
        Ok(())
    }
}
