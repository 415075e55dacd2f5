//! Input document and generator settings
//!
//! The input lists the combining marks per placement category. An optional
//! `generator` table tunes how the artifact is produced:
//!
//! ```toml
//! up = ["\u0300", "\u0301"]
//! down = ["\u0316"]
//! mid = ["\u0334"]
//!
//! [generator]
//! function_name = "is_zalgo_char"
//! strategy = "exact"
//! ```

use crate::error::{Error, Result};
use crate::minimize::{SelectOptions, Strategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Categorized combining marks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CharDocument {
    /// Marks rendered above the base glyph
    pub up: Vec<char>,

    /// Marks rendered below the base glyph
    pub down: Vec<char>,

    /// Marks rendered through the base glyph
    pub mid: Vec<char>,

    /// Generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// How the artifact is produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Name of the generated membership function
    #[serde(default = "default_function_name")]
    pub function_name: String,

    /// Visibility of every generated item
    #[serde(default = "default_visibility")]
    pub visibility: String,

    /// Cover selection strategy
    #[serde(default)]
    pub strategy: Strategy,

    /// Product terms allowed during Petrick expansion before falling back
    /// to greedy selection
    #[serde(default = "default_petrick_limit")]
    pub petrick_limit: usize,

    /// Only compile the plain `char` tables under `#[cfg(test)]`
    #[serde(default = "default_true")]
    pub test_only_tables: bool,
}

fn default_function_name() -> String {
    "is_zalgo_char".to_string()
}

fn default_visibility() -> String {
    "pub(crate)".to_string()
}

fn default_petrick_limit() -> usize {
    4096
}

fn default_true() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            function_name: default_function_name(),
            visibility: default_visibility(),
            strategy: Strategy::default(),
            petrick_limit: default_petrick_limit(),
            test_only_tables: true,
        }
    }
}

impl GeneratorConfig {
    /// Check that the names will produce valid Rust
    pub fn validate(&self) -> Result<()> {
        syn::parse_str::<syn::Ident>(&self.function_name).map_err(|_| {
            Error::Config(format!(
                "function_name '{}' is not a Rust identifier",
                self.function_name
            ))
        })?;
        syn::parse_str::<syn::Visibility>(&self.visibility).map_err(|_| {
            Error::Config(format!(
                "visibility '{}' is not a Rust visibility",
                self.visibility
            ))
        })?;
        if self.petrick_limit == 0 {
            return Err(Error::Config("petrick_limit must be at least 1".into()));
        }
        Ok(())
    }

    pub fn select_options(&self) -> SelectOptions {
        SelectOptions {
            strategy: self.strategy,
            petrick_limit: self.petrick_limit,
        }
    }
}

impl CharDocument {
    /// Load a document, picking the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let doc = match ext.as_deref() {
            Some("toml") => Self::from_toml_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(Error::Config(format!(
                "Unsupported input format: {} (expected .toml, .yaml or .json)",
                path.display()
            ))),
        }?;
        log::info!(
            "loaded {}: {} up, {} down, {} mid",
            path.display(),
            doc.up.len(),
            doc.down.len(),
            doc.mid.len()
        );
        Ok(doc)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let doc: CharDocument = toml::from_str(content)?;
        doc.generator.validate()?;
        Ok(doc)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let doc: CharDocument = serde_norway::from_str(content)?;
        doc.generator.validate()?;
        Ok(doc)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let doc: CharDocument = serde_json::from_str(content)?;
        doc.generator.validate()?;
        Ok(doc)
    }

    /// JSON Schema of the input document
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(CharDocument);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_with_defaults() {
        let doc = CharDocument::from_toml_str(
            r#"
up = ["\u0300", "\u0301"]
down = ["\u0316"]
mid = []
"#,
        )
        .unwrap();
        assert_eq!(doc.up, vec!['\u{0300}', '\u{0301}']);
        assert_eq!(doc.down, vec!['\u{0316}']);
        assert!(doc.mid.is_empty());
        assert_eq!(doc.generator, GeneratorConfig::default());
        assert_eq!(doc.generator.select_options(), SelectOptions::default());
    }

    #[test]
    fn test_parse_toml_generator_table() {
        let doc = CharDocument::from_toml_str(
            r#"
up = []
down = []
mid = ["\u0334"]

[generator]
function_name = "is_mark"
visibility = "pub"
strategy = "greedy"
test_only_tables = false
"#,
        )
        .unwrap();
        assert_eq!(doc.generator.function_name, "is_mark");
        assert_eq!(doc.generator.visibility, "pub");
        assert_eq!(doc.generator.strategy, Strategy::Greedy);
        assert_eq!(doc.generator.petrick_limit, 4096);
        assert!(!doc.generator.test_only_tables);
    }

    #[test]
    fn test_parse_yaml() {
        let doc = CharDocument::from_yaml_str("up: [\"\\u0300\"]\ndown: []\nmid: []\n").unwrap();
        assert_eq!(doc.up, vec!['\u{0300}']);
    }

    #[test]
    fn test_parse_json() {
        let doc =
            CharDocument::from_json_str(r#"{"up": [], "down": ["\u0316"], "mid": []}"#).unwrap();
        assert_eq!(doc.down, vec!['\u{0316}']);
    }

    #[test]
    fn test_missing_category_rejected() {
        let err = CharDocument::from_toml_str("up = []\ndown = []\n").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_multi_char_entry_rejected() {
        let err = CharDocument::from_toml_str("up = [\"ab\"]\ndown = []\nmid = []\n").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_bad_function_name_rejected() {
        let err = CharDocument::from_toml_str(
            "up = []\ndown = []\nmid = []\n[generator]\nfunction_name = \"is zalgo\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_petrick_limit_rejected() {
        let config = GeneratorConfig {
            petrick_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chars.ini");
        std::fs::write(&path, "up = []").unwrap();
        let err = CharDocument::from_path(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_schema_mentions_categories() {
        let schema = CharDocument::json_schema().unwrap();
        assert!(schema.contains("\"up\""));
        assert!(schema.contains("\"generator\""));
    }
}
