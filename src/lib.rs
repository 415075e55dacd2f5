// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # zalgo-gen: zalgo mark tables and membership predicate
//!
//! Build-time generator for the combining-mark tables used to produce
//! "zalgo" text, together with a branch-free function that answers whether
//! a character belongs to any of the tables.
//!
//! ## Core Concept
//!
//! The marks are listed once, by placement, in an input document. From that
//! single document zalgo-gen:
//!
//! - **Emits** sorted `char` tables and their two-byte UTF-8 encodings
//! - **Minimizes** the set of all marks to a small sum of products
//! - **Emits** the membership predicate as masked bit tests behind a range
//!   guard
//! - **Verifies** the predicate against direct membership over every code
//!   point of the 16-bit domain before anything is written
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zalgo_gen::{CharDocument, Generator};
//!
//! let text = std::fs::read_to_string("data/zalgo-char-data.toml")?;
//! let doc = CharDocument::from_toml_str(&text)?;
//! let artifact = Generator::new(doc, text).build()?;
//!
//! assert!(artifact.predicate.is_member_char('\u{0301}'));
//! println!("{} clauses", artifact.report.clauses);
//! ```
//!
//! ## Input Format
//!
//! ```toml
//! up = ["\u030D", "\u030E", "\u0304"]
//! down = ["\u0316", "\u0317"]
//! mid = ["\u0315", "\u031B"]
//!
//! [generator]
//! function_name = "is_zalgo_char"
//! visibility = "pub(crate)"
//! strategy = "exact"
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                             │
//! │  INPUT (TOML / YAML / JSON)                                 │
//! │       │                                                     │
//! │       ├──► CharTables ──► sorted + encoded tables           │
//! │       │                                                     │
//! │       └──► MintermSet ──► prime_implicants                  │
//! │                              │                              │
//! │                              └──► select_cover ──► Cover    │
//! │                                                      │      │
//! │  Predicate::assemble ◄───────────────────────────────┘      │
//! │       │   (range guard + masks, exhaustive check)           │
//! │       │                                                     │
//! │       └──► render ──► syntax gate ──► write_atomic          │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod generate;
pub mod minimize;
pub mod predicate;
pub mod provenance;
pub mod render;
pub mod tables;
pub mod writer;

// Re-exports
pub use config::{CharDocument, GeneratorConfig};
pub use error::{Error, Result};
pub use format::{check_rust, format_rust, FormatError};
pub use generate::{generate_file, Artifact, Generator, Report};
pub use minimize::{
    minimize, BitVector, Clause, Cover, MinimizeError, Minimization, MintermSet, Polarity,
    SelectOptions, Strategy,
};
pub use predicate::{ClauseMask, Predicate};
pub use provenance::{compute_hash, is_stale, Provenance};
pub use render::{render, render_predicate};
pub use tables::{Category, CharTables};
pub use writer::write_atomic;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
