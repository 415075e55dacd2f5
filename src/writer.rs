//! Atomic artifact replacement

use crate::error::{Error, Result};
use std::io::Write;
use std::path::Path;

/// Replace `path` with `contents` atomically
///
/// The contents go to a temporary file in the destination's directory,
/// which is then renamed over the destination. If anything fails the
/// temporary file is removed and the destination keeps its old contents.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".zalgo-gen-")
        .suffix(".part")
        .tempfile_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    log::info!("wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chars.rs");
        write_atomic(&path, "fn f() {}\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fn f() {}\n");
    }

    #[test]
    fn test_replaces_existing_file_and_leaves_no_temporaries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chars.rs");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chars.rs");
        assert!(matches!(write_atomic(&path, "x"), Err(Error::Io(_))));
        assert!(!path.exists());
    }
}
