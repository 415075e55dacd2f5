//! End-to-end generation pipeline
//!
//! ```text
//! document -> tables -> minterms -> primes -> cover -> predicate -> source
//! ```
//!
//! Every stage either succeeds completely or returns an error; nothing is
//! written to disk until the whole artifact has been built and checked.

use crate::config::CharDocument;
use crate::error::{Error, Result};
use crate::minimize::{minimize, MintermSet, Strategy};
use crate::predicate::Predicate;
use crate::provenance::Provenance;
use crate::render::render;
use crate::tables::{Category, CharTables};
use crate::writer::write_atomic;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Summary of one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Members per category after deduplication
    pub categories: BTreeMap<Category, usize>,
    /// Distinct members across all categories
    pub members: usize,
    pub prime_implicants: usize,
    pub essential_primes: usize,
    /// Rows of the prime implicant chart left after reduction
    pub core_rows: usize,
    pub clauses: usize,
    pub literals: u32,
    /// Inclusive range guard, absent for an empty set
    pub range: Option<(u32, u32)>,
    pub strategy: Strategy,
    /// Petrick's method hit its limit and greedy selection took over
    pub fell_back: bool,
}

/// A fully built and checked artifact
#[derive(Debug, Clone)]
pub struct Artifact {
    pub source: String,
    pub predicate: Predicate,
    pub tables: CharTables,
    pub report: Report,
}

/// Builds the artifact for one input document
#[derive(Debug, Clone)]
pub struct Generator {
    document: CharDocument,
    input: Vec<u8>,
}

impl Generator {
    /// `input` is the raw document text, hashed into the provenance header
    pub fn new(document: CharDocument, input: impl Into<Vec<u8>>) -> Self {
        Generator {
            document,
            input: input.into(),
        }
    }

    /// Load the document at `path`
    pub fn from_path(path: &Path) -> Result<Self> {
        let document = CharDocument::from_path(path)?;
        let input = std::fs::read(path)?;
        Ok(Generator::new(document, input))
    }

    /// Override the cover selection strategy from the document
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.document.generator.strategy = strategy;
        self
    }

    pub fn document(&self) -> &CharDocument {
        &self.document
    }

    pub fn build(&self) -> Result<Artifact> {
        let config = &self.document.generator;
        let tables = CharTables::from_document(&self.document);
        for category in Category::ALL {
            tables.encoded(category)?;
        }

        let minterms = MintermSet::from_chars(tables.all_chars())?;
        let options = config.select_options();
        let result = minimize(&minterms, &options)?;
        log::info!(
            "{} members minimized to {} clauses ({} literals)",
            minterms.len(),
            result.cover.len(),
            result.cover.literal_count()
        );

        let predicate = Predicate::assemble(&minterms, &result.cover)?;
        log::info!("predicate verified over the full domain");

        let bounds = tables.bounds();
        if bounds != predicate.range() {
            return Err(Error::Other(format!(
                "range guard {:?} disagrees with table bounds {:?}",
                predicate.range(),
                bounds
            )));
        }

        let provenance = Provenance::new(&self.input);
        let source = render(&provenance, config, &tables, &predicate)?;

        let report = Report {
            categories: Category::ALL
                .iter()
                .map(|&cat| (cat, tables.chars(cat).len()))
                .collect(),
            members: minterms.len(),
            prime_implicants: result.prime_count,
            essential_primes: result.essential_count,
            core_rows: result.core_rows,
            clauses: result.cover.len(),
            literals: result.cover.literal_count(),
            range: bounds,
            strategy: options.strategy,
            fell_back: result.fell_back,
        };

        Ok(Artifact {
            source,
            predicate,
            tables,
            report,
        })
    }
}

/// Build the artifact for `input` and write it to `output`
///
/// `strategy` overrides the document's choice when given. The output file
/// is only replaced once the artifact has been built and checked.
pub fn generate_file(
    input: &Path,
    output: &Path,
    strategy: Option<Strategy>,
) -> Result<Artifact> {
    let mut generator = Generator::from_path(input)?;
    if let Some(strategy) = strategy {
        generator = generator.with_strategy(strategy);
    }
    let artifact = generator.build()?;
    write_atomic(output, &artifact.source)?;
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minimize::MinimizeError;

    const SMALL: &str = "up = [\"\\u0300\", \"\\u0301\", \"\\u0302\"]\ndown = [\"\\u0316\"]\nmid = [\"\\u0334\", \"\\u0301\"]\n";

    fn generator(text: &str) -> Generator {
        Generator::new(CharDocument::from_toml_str(text).unwrap(), text)
    }

    #[test]
    fn test_build_small_document() {
        let artifact = generator(SMALL).build().unwrap();
        let report = &artifact.report;

        assert_eq!(report.categories[&Category::Up], 3);
        assert_eq!(report.categories[&Category::Down], 1);
        assert_eq!(report.categories[&Category::Mid], 2);
        assert_eq!(report.members, 5);
        assert_eq!(report.range, Some((0x300, 0x334)));
        assert_eq!(artifact.tables.bounds(), artifact.predicate.range());
        assert_eq!(report.strategy, Strategy::Exact);
        assert!(!report.fell_back);
        assert!(report.clauses <= report.members);

        for c in ['\u{0300}', '\u{0301}', '\u{0302}', '\u{0316}', '\u{0334}'] {
            assert!(artifact.predicate.is_member_char(c));
        }
        assert!(!artifact.predicate.is_member_char('\u{0303}'));
        assert!(!artifact.predicate.is_member_char('a'));
    }

    #[test]
    fn test_strategy_override() {
        let artifact = generator(SMALL)
            .with_strategy(Strategy::Greedy)
            .build()
            .unwrap();
        assert_eq!(artifact.report.strategy, Strategy::Greedy);
    }

    #[test]
    fn test_out_of_domain_member_rejected() {
        let text = "up = [\"\\U0001F600\"]\ndown = []\nmid = []\n";
        let err = generator(text).build().unwrap_err();
        // The emoji fails the two-byte check before it reaches the vectorizer
        assert!(matches!(err, Error::EncodingWidth { .. }));
    }

    #[test]
    fn test_three_byte_member_rejected() {
        let text = "up = []\ndown = []\nmid = [\"\\u20D2\"]\n";
        let err = generator(text).build().unwrap_err();
        assert!(matches!(
            err,
            Error::EncodingWidth {
                category: Category::Mid,
                code_point: 0x20D2,
                len: 3
            }
        ));
    }

    #[test]
    fn test_minterm_domain_checked_without_tables() {
        let err = MintermSet::from_chars(['\u{10000}']).unwrap_err();
        assert_eq!(err, MinimizeError::OutOfDomain { code_point: 0x10000 });
    }

    #[test]
    fn test_report_serializes() {
        let artifact = generator(SMALL).build().unwrap();
        let json = serde_json::to_value(&artifact.report).unwrap();
        assert_eq!(json["categories"]["up"], 3);
        assert_eq!(json["strategy"], "exact");
        assert_eq!(json["range"][0], 0x300);
    }
}
