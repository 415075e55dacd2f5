//! Minimum cover selection
//!
//! Treats the choice of prime implicants as a unate covering problem. The
//! prime implicant chart is first reduced to its cyclic core by repeatedly
//! taking essential primes and dropping dominated rows and columns. The
//! core is then solved exactly with Petrick's method, or greedily when the
//! Petrick expansion grows past a configured limit.

use super::clause::Clause;
use super::error::MinimizeError;
use super::minterms::MintermSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

/// How the cyclic core of the chart is solved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Petrick's method, minimal clause count then literal count
    #[default]
    Exact,
    /// Repeatedly take the prime covering the most uncovered minterms
    Greedy,
}

/// Options for cover selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOptions {
    pub strategy: Strategy,
    /// Maximum number of product terms kept while expanding Petrick's
    /// product of sums
    pub petrick_limit: usize,
}

impl Default for SelectOptions {
    fn default() -> Self {
        SelectOptions {
            strategy: Strategy::Exact,
            petrick_limit: 4096,
        }
    }
}

impl SelectOptions {
    pub fn greedy() -> Self {
        SelectOptions {
            strategy: Strategy::Greedy,
            ..Default::default()
        }
    }
}

/// Outcome of cover selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Chosen clauses in ascending order
    pub clauses: Vec<Clause>,
    /// How many of them were essential primes
    pub essential: usize,
    /// Size of the cyclic core left after reduction
    pub core_rows: usize,
    /// Petrick's method exceeded its limit and greedy selection was used
    pub fell_back: bool,
}

/// Choose a subset of `primes` whose union is exactly `minterms`
pub fn select_cover(
    primes: &[Clause],
    minterms: &MintermSet,
    options: &SelectOptions,
) -> Result<Selection, MinimizeError> {
    let mut chart = Chart::new(primes, minterms)?;
    chart.reduce();

    let essential = chart.chosen.len();
    let core_rows = chart.remaining.len();
    let mut fell_back = false;

    if !chart.remaining.is_empty() {
        log::debug!(
            "cyclic core: {} rows, {} columns",
            chart.remaining.len(),
            chart.active.len()
        );
        let picked = match options.strategy {
            Strategy::Exact => match chart.petrick(options.petrick_limit) {
                Some(picked) => picked,
                None => {
                    log::warn!(
                        "Petrick expansion exceeded {} terms, using greedy selection for the remaining {} minterms",
                        options.petrick_limit,
                        chart.remaining.len()
                    );
                    fell_back = true;
                    chart.greedy()?
                }
            },
            Strategy::Greedy => chart.greedy()?,
        };
        chart.chosen.extend(picked);
    }

    chart.drop_redundant();
    chart.check_complete()?;

    let mut clauses: Vec<Clause> = chart.chosen.iter().map(|&i| primes[i]).collect();
    clauses.sort();

    Ok(Selection {
        clauses,
        essential,
        core_rows,
        fell_back,
    })
}

/// Prime implicant chart
struct Chart<'a> {
    primes: &'a [Clause],
    minterms: Vec<u32>,
    /// minterm -> primes covering it
    rows: BTreeMap<u32, BTreeSet<usize>>,
    /// primes still eligible
    active: BTreeSet<usize>,
    /// minterms still to be covered
    remaining: BTreeSet<u32>,
    chosen: BTreeSet<usize>,
}

impl<'a> Chart<'a> {
    fn new(primes: &'a [Clause], minterms: &MintermSet) -> Result<Self, MinimizeError> {
        let mut rows = BTreeMap::new();
        for m in minterms.iter() {
            let covering: BTreeSet<usize> = primes
                .iter()
                .enumerate()
                .filter(|(_, p)| p.matches(m))
                .map(|(i, _)| i)
                .collect();
            if covering.is_empty() {
                return Err(MinimizeError::Uncovered(m));
            }
            rows.insert(m, covering);
        }

        Ok(Chart {
            primes,
            minterms: minterms.iter().collect(),
            rows,
            active: (0..primes.len()).collect(),
            remaining: minterms.iter().collect(),
            chosen: BTreeSet::new(),
        })
    }

    /// Active primes covering a remaining minterm
    fn candidates(&self, m: u32) -> BTreeSet<usize> {
        self.rows[&m].intersection(&self.active).copied().collect()
    }

    /// Remaining minterms covered by a prime
    fn coverage(&self, p: usize) -> BTreeSet<u32> {
        self.remaining
            .iter()
            .copied()
            .filter(|&m| self.primes[p].matches(m))
            .collect()
    }

    fn choose(&mut self, p: usize) {
        self.chosen.insert(p);
        self.active.remove(&p);
        let prime = self.primes[p];
        self.remaining.retain(|&m| !prime.matches(m));
    }

    /// Essential primes and dominance, until nothing changes
    fn reduce(&mut self) {
        loop {
            let mut changed = false;

            let essentials: BTreeSet<usize> = self
                .remaining
                .iter()
                .filter_map(|&m| {
                    let c = self.candidates(m);
                    if c.len() == 1 {
                        c.into_iter().next()
                    } else {
                        None
                    }
                })
                .collect();
            for p in essentials {
                self.choose(p);
                changed = true;
            }

            // Columns: drop primes whose coverage is contained in a prime
            // that is no more expensive
            let columns: Vec<(usize, BTreeSet<u32>)> = self
                .active
                .iter()
                .map(|&p| (p, self.coverage(p)))
                .collect();
            for (p, cov) in &columns {
                let dominated = cov.is_empty()
                    || columns.iter().any(|(q, other)| {
                        q != p
                            && self.active.contains(q)
                            && cov.is_subset(other)
                            && self.dominates(*q, *p, other.len() == cov.len())
                    });
                if dominated {
                    self.active.remove(p);
                    changed = true;
                }
            }

            // Rows: a minterm whose candidates include every candidate of
            // another minterm is covered whenever that one is
            let row_sets: Vec<(u32, BTreeSet<usize>)> = self
                .remaining
                .iter()
                .map(|&m| (m, self.candidates(m)))
                .collect();
            let mut dropped: BTreeSet<u32> = BTreeSet::new();
            for (m, cands) in &row_sets {
                let dominated = row_sets.iter().any(|(n, other)| {
                    n != m
                        && !dropped.contains(n)
                        && other.is_subset(cands)
                        && (other.len() < cands.len() || n < m)
                });
                if dominated {
                    dropped.insert(*m);
                }
            }
            if !dropped.is_empty() {
                self.remaining.retain(|m| !dropped.contains(m));
                changed = true;
            }

            if !changed {
                break;
            }
        }
    }

    /// Whether prime `q` may replace prime `p` whose coverage it contains
    fn dominates(&self, q: usize, p: usize, same_coverage: bool) -> bool {
        let (lq, lp) = (
            self.primes[q].literal_count(),
            self.primes[p].literal_count(),
        );
        if same_coverage && lq == lp {
            // Identical columns: keep the lower index
            q < p
        } else {
            lq <= lp
        }
    }

    /// Petrick's method over the remaining rows
    fn petrick(&self, limit: usize) -> Option<BTreeSet<usize>> {
        let mut rows: Vec<BTreeSet<usize>> =
            self.remaining.iter().map(|&m| self.candidates(m)).collect();
        rows.sort_by_key(|r| r.len());

        let mut products: Vec<BTreeSet<usize>> = vec![BTreeSet::new()];
        for (step, sum) in rows.iter().enumerate() {
            let mut next: Vec<BTreeSet<usize>> = Vec::new();
            for product in &products {
                // X(X + Y) = X
                if sum.iter().any(|p| product.contains(p)) {
                    next.push(product.clone());
                    continue;
                }
                for p in sum {
                    let mut term = product.clone();
                    term.insert(*p);
                    next.push(term);
                }
            }
            products = absorb(next);
            log::debug!("Petrick step {}: {} product terms", step + 1, products.len());
            if products.len() > limit {
                return None;
            }
        }

        products
            .into_iter()
            .min_by_key(|term| self.cost(term))
    }

    fn cost(&self, term: &BTreeSet<usize>) -> (usize, u32, Vec<usize>) {
        let literals = term.iter().map(|&p| self.primes[p].literal_count()).sum();
        (term.len(), literals, term.iter().copied().collect())
    }

    /// Greedy selection over the remaining rows
    fn greedy(&self) -> Result<BTreeSet<usize>, MinimizeError> {
        let mut uncovered = self.remaining.clone();
        let mut picked = BTreeSet::new();

        loop {
            let Some(first) = uncovered.first().copied() else {
                break;
            };
            let best = self
                .active
                .iter()
                .copied()
                .filter(|p| !picked.contains(p))
                .map(|p| {
                    let gain = uncovered
                        .iter()
                        .filter(|&&m| self.primes[p].matches(m))
                        .count();
                    (p, gain)
                })
                .filter(|&(_, gain)| gain > 0)
                .max_by_key(|&(p, gain)| (gain, Reverse(self.primes[p].literal_count()), Reverse(p)));

            let Some((p, _)) = best else {
                return Err(MinimizeError::Uncovered(first));
            };
            picked.insert(p);
            let prime = self.primes[p];
            uncovered.retain(|&m| !prime.matches(m));
        }

        Ok(picked)
    }

    /// Drop chosen primes whose minterms are all covered by the others,
    /// most expensive first
    fn drop_redundant(&mut self) {
        let mut order: Vec<usize> = self.chosen.iter().copied().collect();
        order.sort_by_key(|&p| (Reverse(self.primes[p].literal_count()), p));

        for p in order {
            let others: Vec<Clause> = self
                .chosen
                .iter()
                .filter(|&&q| q != p)
                .map(|&q| self.primes[q])
                .collect();
            let redundant = self
                .minterms
                .iter()
                .filter(|&&m| self.primes[p].matches(m))
                .all(|&m| others.iter().any(|c| c.matches(m)));
            if redundant {
                self.chosen.remove(&p);
            }
        }
    }

    fn check_complete(&self) -> Result<(), MinimizeError> {
        for &m in &self.minterms {
            if !self.chosen.iter().any(|&p| self.primes[p].matches(m)) {
                return Err(MinimizeError::Uncovered(m));
            }
        }
        Ok(())
    }
}

/// Deduplicate product terms and remove any term that contains another
fn absorb(mut terms: Vec<BTreeSet<usize>>) -> Vec<BTreeSet<usize>> {
    terms.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    terms.dedup();

    let mut kept: Vec<BTreeSet<usize>> = Vec::with_capacity(terms.len());
    for term in terms {
        if !kept.iter().any(|k| k.is_subset(&term)) {
            kept.push(term);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::super::primes::prime_implicants;
    use super::*;

    fn select(width: u32, points: &[u32], options: &SelectOptions) -> Selection {
        let set = MintermSet::from_points(width, points.iter().copied()).unwrap();
        let primes = prime_implicants(&set);
        select_cover(&primes, &set, options).unwrap()
    }

    fn patterns(width: u32, selection: &Selection) -> Vec<String> {
        let mut out: Vec<String> = selection
            .clauses
            .iter()
            .map(|c| c.pattern(width))
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_essential_primes_only() {
        let sel = select(3, &[0, 1, 2], &SelectOptions::default());
        assert_eq!(patterns(3, &sel), vec!["0-0", "00-"]);
        assert_eq!(sel.essential, 2);
        assert_eq!(sel.core_rows, 0);
        assert!(!sel.fell_back);
    }

    #[test]
    fn test_textbook_function_minimum() {
        // m(0,1,2,5,6,7,8,9,10,14) needs three terms
        let sel = select(4, &[0, 1, 2, 5, 6, 7, 8, 9, 10, 14], &SelectOptions::default());
        assert_eq!(patterns(4, &sel), vec!["--10", "-00-", "01-1"]);
    }

    #[test]
    fn test_cyclic_chart_is_solved_exactly() {
        // m(0,1,2,5,6,7) has no essential primes
        let sel = select(3, &[0, 1, 2, 5, 6, 7], &SelectOptions::default());
        assert_eq!(sel.essential, 0);
        assert_eq!(sel.clauses.len(), 3);
        assert!(!sel.fell_back);
    }

    #[test]
    fn test_greedy_still_covers_everything() {
        let points = [0, 1, 2, 5, 6, 7];
        let sel = select(3, &points, &SelectOptions::greedy());
        for p in 0..8 {
            let covered = sel.clauses.iter().any(|c| c.matches(p));
            assert_eq!(covered, points.contains(&p));
        }
    }

    #[test]
    fn test_petrick_limit_falls_back_to_greedy() {
        let options = SelectOptions {
            strategy: Strategy::Exact,
            petrick_limit: 1,
        };
        let sel = select(3, &[0, 1, 2, 5, 6, 7], &options);
        assert!(sel.fell_back);
        assert!(sel.clauses.len() <= 4);
    }

    #[test]
    fn test_uncovered_minterm_is_an_error() {
        let set = MintermSet::from_points(2, [0, 3]).unwrap();
        let primes = vec![Clause::parse("00").unwrap()];
        let err = select_cover(&primes, &set, &SelectOptions::default()).unwrap_err();
        assert_eq!(err, MinimizeError::Uncovered(3));
    }

    #[test]
    fn test_absorb() {
        let a: BTreeSet<usize> = [1].into_iter().collect();
        let ab: BTreeSet<usize> = [1, 2].into_iter().collect();
        let c: BTreeSet<usize> = [3].into_iter().collect();
        let kept = absorb(vec![ab, c.clone(), a.clone(), a.clone()]);
        assert_eq!(kept, vec![a, c]);
    }

    #[test]
    fn test_strategy_serde() {
        let s: Strategy = serde_json::from_str("\"greedy\"").unwrap();
        assert_eq!(s, Strategy::Greedy);
        assert_eq!(serde_json::to_string(&Strategy::Exact).unwrap(), "\"exact\"");
    }
}
