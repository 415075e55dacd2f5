//! # Two-level logic minimizer
//!
//! Exact sum-of-products minimization over a bounded-width Boolean domain.
//!
//! ## Overview
//!
//! Points of the on-set are bit vectors. A clause is a product term where
//! each bit is:
//! - `0` (bit must be clear)
//! - `1` (bit must be set)
//! - `-` (don't care)
//!
//! Minimization runs in three stages:
//!
//! 1. **PRIMES**: Quine–McCluskey merging to a fixed point
//! 2. **SELECT**: essential primes, chart reduction, then Petrick's method
//!    (or a greedy pass) on the cyclic core
//! 3. **VERIFY**: the selected cover must reproduce the on-set exactly
//!
//! ## Example
//!
//! ```
//! use zalgo_gen::minimize::{minimize, MintermSet, SelectOptions};
//!
//! let on_set = MintermSet::from_points(3, [0, 1, 2, 3]).unwrap();
//! let result = minimize(&on_set, &SelectOptions::default()).unwrap();
//!
//! assert_eq!(result.cover.len(), 1);
//! assert_eq!(result.cover.clauses()[0].pattern(3), "0--");
//! ```

pub mod clause;
pub mod cover;
pub mod error;
pub mod minterms;
pub mod primes;
pub mod select;
pub mod vector;

pub use clause::{Clause, Polarity};
pub use cover::Cover;
pub use error::MinimizeError;
pub use minterms::MintermSet;
pub use primes::prime_implicants;
pub use select::{select_cover, SelectOptions, Selection, Strategy};
pub use vector::{BitVector, DOMAIN_END, PADDING_MASK, SIGNIFICANT_BITS, WIDTH};

/// Result type for minimizer operations
pub type Result<T> = std::result::Result<T, MinimizeError>;

/// A verified cover plus what it took to get there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minimization {
    pub cover: Cover,
    pub prime_count: usize,
    pub essential_count: usize,
    pub core_rows: usize,
    pub fell_back: bool,
}

/// Minimize the function whose on-set is `minterms`
pub fn minimize(minterms: &MintermSet, options: &SelectOptions) -> Result<Minimization> {
    let width = minterms.width();
    if minterms.is_empty() {
        return Ok(Minimization {
            cover: Cover::new(width),
            prime_count: 0,
            essential_count: 0,
            core_rows: 0,
            fell_back: false,
        });
    }

    let primes = prime_implicants(minterms);
    log::debug!(
        "{} minterms produced {} prime implicants",
        minterms.len(),
        primes.len()
    );

    let selection = select_cover(&primes, minterms, options)?;
    let cover = Cover::from_clauses(selection.clauses, width);
    cover.verify_exact(minterms)?;

    Ok(Minimization {
        cover,
        prime_count: primes.len(),
        essential_count: selection.essential,
        core_rows: selection.core_rows,
        fell_back: selection.fell_back,
    })
}
