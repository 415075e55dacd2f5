//! Provenance tracking for staleness detection
//!
//! Every generated artifact starts with a header recording the SHA-256 of
//! the input document it was built from. Comparing that hash with the
//! current input tells whether the artifact must be regenerated.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

const TOOL_PREFIX: &str = "// Generated by zalgo-gen ";
const HASH_PREFIX: &str = "// INPUT HASH: ";
const TIME_PREFIX: &str = "// GENERATED: ";

/// Where an artifact came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    /// SHA-256 of the input document (lowercase hex)
    pub input_hash: String,

    /// When the artifact was generated
    pub generated_at: DateTime<Utc>,

    /// zalgo-gen version that generated it
    pub tool_version: String,
}

impl Provenance {
    /// Provenance for an artifact generated now from `input`
    pub fn new(input: &[u8]) -> Self {
        Provenance {
            input_hash: compute_hash(input),
            generated_at: Utc::now(),
            tool_version: crate::VERSION.to_string(),
        }
    }

    /// Header comment lines, each ending in a newline
    pub fn header(&self) -> String {
        format!(
            "{TOOL_PREFIX}{}\n{HASH_PREFIX}{}\n{TIME_PREFIX}{}\n// DO NOT EDIT - regenerate from the input document\n",
            self.tool_version,
            self.input_hash,
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }

    /// Read the provenance back out of an artifact's header
    pub fn parse(artifact: &str) -> Option<Self> {
        let mut tool_version = None;
        let mut input_hash = None;
        let mut generated_at = None;

        for line in artifact.lines().take_while(|l| l.starts_with("//")) {
            if let Some(v) = line.strip_prefix(TOOL_PREFIX) {
                tool_version = Some(v.trim().to_string());
            } else if let Some(h) = line.strip_prefix(HASH_PREFIX) {
                input_hash = Some(h.trim().to_string());
            } else if let Some(t) = line.strip_prefix(TIME_PREFIX) {
                generated_at = DateTime::parse_from_rfc3339(t.trim())
                    .ok()
                    .map(|d| d.with_timezone(&Utc));
            }
        }

        Some(Provenance {
            input_hash: input_hash?,
            generated_at: generated_at?,
            tool_version: tool_version?,
        })
    }
}

/// SHA-256 of `bytes` as lowercase hex
pub fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Whether `artifact` needs regenerating for the given input
///
/// An artifact without a readable header is always stale.
pub fn is_stale(artifact: &str, input: &[u8]) -> bool {
    Provenance::parse(artifact)
        .map(|p| p.input_hash != compute_hash(input))
        .unwrap_or(true)
}
