//! Character tables
//!
//! Sorted, duplicate-free character lists per placement category, and the
//! fixed-width UTF-8 encodings the runtime picks from.

use crate::config::CharDocument;
use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Where a combining mark renders relative to its base glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Above the base glyph
    Up,
    /// Below the base glyph
    Down,
    /// Through the base glyph
    Mid,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Up, Category::Down, Category::Mid];

    /// Lowercase key used in the input document
    pub fn key(self) -> &'static str {
        match self {
            Category::Up => "up",
            Category::Down => "down",
            Category::Mid => "mid",
        }
    }

    /// Capitalized name for documentation
    pub fn label(self) -> &'static str {
        match self {
            Category::Up => "Up",
            Category::Down => "Down",
            Category::Mid => "Mid",
        }
    }

    /// Placement relative to the base glyph
    pub fn placement(self) -> &'static str {
        match self {
            Category::Up => "above",
            Category::Down => "below",
            Category::Mid => "through",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

/// Per-category sorted tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharTables {
    up: Vec<char>,
    down: Vec<char>,
    mid: Vec<char>,
}

impl CharTables {
    pub fn from_document(doc: &CharDocument) -> Self {
        CharTables {
            up: sorted(&doc.up),
            down: sorted(&doc.down),
            mid: sorted(&doc.mid),
        }
    }

    /// Sorted characters of one category
    pub fn chars(&self, category: Category) -> &[char] {
        match category {
            Category::Up => &self.up,
            Category::Down => &self.down,
            Category::Mid => &self.mid,
        }
    }

    /// Two-byte UTF-8 encodings of one category, in table order
    pub fn encoded(&self, category: Category) -> Result<Vec<[u8; 2]>> {
        self.chars(category)
            .iter()
            .map(|&c| encode_pair(category, c))
            .collect()
    }

    /// Every character of every category, ascending and deduplicated
    pub fn all_chars(&self) -> Vec<char> {
        Category::ALL
            .iter()
            .flat_map(|&cat| self.chars(cat).iter().copied())
            .collect::<BTreeSet<char>>()
            .into_iter()
            .collect()
    }

    /// Smallest and largest code point across all categories
    pub fn bounds(&self) -> Option<(u32, u32)> {
        let all = self.all_chars();
        all.first()
            .zip(all.last())
            .map(|(&lo, &hi)| (u32::from(lo), u32::from(hi)))
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|&cat| self.chars(cat).is_empty())
    }
}

fn sorted(chars: &[char]) -> Vec<char> {
    let mut out = chars.to_vec();
    out.sort_unstable();
    out.dedup();
    out
}

/// Encode a character that must take exactly two UTF-8 bytes
pub fn encode_pair(category: Category, c: char) -> Result<[u8; 2]> {
    let mut buf = [0u8; 4];
    let bytes = c.encode_utf8(&mut buf).as_bytes();
    match *bytes {
        [a, b] => Ok([a, b]),
        _ => Err(Error::EncodingWidth {
            category,
            code_point: u32::from(c),
            len: bytes.len(),
        }),
    }
}
