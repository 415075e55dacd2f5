//! Rust source formatting and syntax checks for generated code

use std::fmt;

/// Pretty-print Rust source with prettyplease
///
/// Plain `//` comments do not survive, doc comments do.
pub fn format_rust(code: &str) -> Result<String, FormatError> {
    let file = parse(code)?;
    Ok(prettyplease::unparse(&file))
}

/// Check that `code` parses as a Rust source file, comments included
pub fn check_rust(code: &str) -> Result<(), FormatError> {
    parse(code).map(|_| ())
}

fn parse(code: &str) -> Result<syn::File, FormatError> {
    syn::parse_file(code).map_err(|e| FormatError {
        message: e.to_string(),
    })
}

/// Generated code that is not valid Rust
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub message: String,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "generated code does not parse: {}", self.message)
    }
}

impl std::error::Error for FormatError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rust_simple() {
        let result = format_rust("fn foo(c:u32)->bool{let case_0=c&0b1==0b1;case_0}").unwrap();
        assert!(result.contains("fn foo(c: u32) -> bool"));
        assert!(result.contains("let case_0 = c & 0b1 == 0b1;"));
    }

    #[test]
    fn test_check_rust_keeps_comments_legal() {
        assert!(check_rust("// header\nconst A: &[char] = &['\\u{0300}', // x\n];\n").is_ok());
    }

    #[test]
    fn test_invalid_code_rejected() {
        let err = check_rust("fn invalid( { }").unwrap_err();
        assert!(err.to_string().starts_with("generated code does not parse"));
    }
}
