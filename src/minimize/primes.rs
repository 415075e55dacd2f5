//! Prime implicant generation (Quine–McCluskey)
//!
//! Starts from one clause per minterm and repeatedly merges pairs that
//! share a don't-care set and disagree on exactly one literal. A merged
//! clause covers exactly the union of its parents, so exactness with
//! respect to the on-set holds without consulting an off-set. Clauses that
//! never merge at their level are prime.

use super::clause::Clause;
use super::minterms::MintermSet;
use std::collections::{BTreeMap, BTreeSet};

/// All prime implicants of an on-set, in ascending clause order
pub fn prime_implicants(minterms: &MintermSet) -> Vec<Clause> {
    let width = minterms.width();
    let mut level: BTreeSet<Clause> = minterms
        .iter()
        .map(|bits| Clause::from_minterm(bits, width))
        .collect();
    let mut primes = BTreeSet::new();
    let mut pass = 0usize;

    while !level.is_empty() {
        pass += 1;

        // Only clauses with the same care mask whose pos popcounts differ by
        // one can merge, so bucket on both
        let mut groups: BTreeMap<(u32, u32), Vec<Clause>> = BTreeMap::new();
        for clause in &level {
            groups
                .entry((clause.care_mask(), clause.pos().count_ones()))
                .or_default()
                .push(*clause);
        }

        let mut merged: BTreeSet<Clause> = BTreeSet::new();
        let mut next: BTreeSet<Clause> = BTreeSet::new();
        for ((care, ones), lower) in &groups {
            let Some(upper) = groups.get(&(*care, ones + 1)) else {
                continue;
            };
            for a in lower {
                for b in upper {
                    if let Some(bit) = a.merge_position(b) {
                        next.insert(a.merge(bit));
                        merged.insert(*a);
                        merged.insert(*b);
                    }
                }
            }
        }

        let before = primes.len();
        primes.extend(level.iter().filter(|c| !merged.contains(c)).copied());
        log::debug!(
            "QM pass {}: {} clauses, {} merged, {} new primes, {} carried forward",
            pass,
            level.len(),
            merged.len(),
            primes.len() - before,
            next.len()
        );

        level = next;
    }

    primes.into_iter().collect()
}
