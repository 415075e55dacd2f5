//! Rust source generation for the char tables and the membership predicate
//!
//! The tables come from an embedded MiniJinja template. The predicate
//! function is built as text and pretty-printed through prettyplease so
//! long clause lines wrap the way rustfmt would.

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::format::{check_rust, format_rust};
use crate::predicate::Predicate;
use crate::provenance::Provenance;
use crate::tables::{Category, CharTables};
use minijinja::{context, Environment};
use serde::Serialize;

const CHARS_TEMPLATE: &str = include_str!("../templates/chars.rs.jinja");

/// One table entry as the template sees it
#[derive(Debug, Serialize)]
struct CharEntry {
    literal: String,
    glyph: char,
    bytes: String,
}

/// One category as the template sees it
#[derive(Debug, Serialize)]
struct CategoryEntry {
    name: String,
    key: &'static str,
    label: &'static str,
    placement: &'static str,
    chars: Vec<CharEntry>,
}

/// Render the complete generated source file
///
/// The result is parsed back with `syn` before it is returned; output that
/// is not valid Rust is an error.
pub fn render(
    provenance: &Provenance,
    config: &GeneratorConfig,
    tables: &CharTables,
    predicate: &Predicate,
) -> Result<String> {
    let categories = Category::ALL
        .iter()
        .map(|&cat| category_entry(tables, cat))
        .collect::<Result<Vec<_>>>()?;
    let predicate_fn = render_predicate(config, predicate)?;

    let mut env = Environment::new();
    env.add_template("chars.rs.jinja", CHARS_TEMPLATE)?;
    let source = env.get_template("chars.rs.jinja")?.render(context! {
        header => provenance.header(),
        visibility => &config.visibility,
        test_only_tables => config.test_only_tables,
        categories => categories,
        predicate_fn => predicate_fn,
    })?;

    check_rust(&source).map_err(|e| Error::Render(e.to_string()))?;
    Ok(source)
}

fn category_entry(tables: &CharTables, category: Category) -> Result<CategoryEntry> {
    let encoded = tables.encoded(category)?;
    let chars = tables
        .chars(category)
        .iter()
        .zip(encoded)
        .map(|(&c, [a, b])| CharEntry {
            literal: format!("'\\u{{{:04X}}}'", u32::from(c)),
            glyph: c,
            bytes: format!("[0x{:02X}, 0x{:02X}]", a, b),
        })
        .collect();

    Ok(CategoryEntry {
        name: category.key().to_uppercase(),
        key: category.key(),
        label: category.label(),
        placement: category.placement(),
        chars,
    })
}

/// Render the membership function alone, formatted
pub fn render_predicate(config: &GeneratorConfig, predicate: &Predicate) -> Result<String> {
    let vis = &config.visibility;
    let name = &config.function_name;
    let mut out = String::from("/// Check if a given char is a zalgo char.\n");

    match predicate.range() {
        None => {
            out.push_str(&format!("{vis} fn {name}(_c: char) -> bool {{ false }}\n"));
        }
        Some((min, max)) => {
            out.push_str(&format!("{vis} fn {name}(c: char) -> bool {{\n"));
            out.push_str("let c = u32::from(c);\n");
            out.push_str(&format!(
                "if !(0x{min:04X}..=0x{max:04X}).contains(&c) {{ return false; }}\n"
            ));

            let mut cases = Vec::with_capacity(predicate.masks().len());
            for (i, mask) in predicate.masks().iter().enumerate() {
                out.push_str(&format!(
                    "let case_{i} = c & 0b{pos:032b} == 0b{pos:032b} && c & 0b{neg:032b} == 0;\n",
                    pos = mask.pos,
                    neg = mask.neg,
                ));
                cases.push(format!("case_{i}"));
            }
            out.push_str(&cases.join(" || "));
            out.push_str("\n}\n");
        }
    }

    format_rust(&out).map_err(|e| Error::Render(e.to_string()))
}
