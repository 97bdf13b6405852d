//! Test-script discovery on disk

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::EngineResult;

/// Find all scripts under `dir` with the given extension (no leading dot),
/// sorted by path. A missing directory yields an empty list, not an error.
pub fn discover_scripts(dir: &Path, extension: &str) -> EngineResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        warn!("Script directory not found: {}", dir.display());
        return Ok(Vec::new());
    }

    let mut scripts: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case(extension))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();

    scripts.sort();
    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_only_matching_extensions_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "click \"x\"").unwrap();
        fs::write(dir.path().join("a.txt"), "click \"y\"").unwrap();
        fs::write(dir.path().join("c.feature"), "Feature: z").unwrap();
        fs::write(dir.path().join("notes.md"), "# notes").unwrap();

        let txt = discover_scripts(dir.path(), "txt").unwrap();
        assert_eq!(txt.len(), 2);
        assert!(txt[0].ends_with("a.txt"));
        assert!(txt[1].ends_with("b.txt"));

        let features = discover_scripts(dir.path(), "feature").unwrap();
        assert_eq!(features.len(), 1);
    }

    #[test]
    fn missing_directory_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(discover_scripts(&missing, "txt").unwrap().is_empty());
    }
}
