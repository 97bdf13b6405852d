//! Multi-dialect script parser
//!
//! Raw text lines are normalized into the canonical [`TestCase`] model. Two
//! top-level grammars are supported: the legacy/structured dialect (plain
//! text) and the narrative dialect (`.feature` files). The dialect is chosen
//! from the filename extension; within a dialect, each line is matched
//! against an ordered rule list where the first match wins.
//!
//! Parsing is maximally lenient: a line matching no rule is dropped, never an
//! error. Only a missing script file fails.

mod legacy;
mod narrative;

use std::path::{Path, PathBuf};

use casekit_common::TestCase;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// Top-level script grammar, detected from the filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    /// Structured/summary plain-text scripts
    Legacy,
    /// Given/When/Then-style `.feature` scripts
    Narrative,
}

impl ScriptFormat {
    /// Detect the format from a file path: `.feature` selects the narrative
    /// dialect, everything else the legacy dialect.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("feature") => ScriptFormat::Narrative,
            _ => ScriptFormat::Legacy,
        }
    }
}

/// Parse already-split lines into a test case.
pub fn parse_lines(lines: &[String], format: ScriptFormat) -> TestCase {
    match format {
        ScriptFormat::Legacy => legacy::parse_legacy(lines),
        ScriptFormat::Narrative => narrative::parse_narrative(lines),
    }
}

/// Parse a whole script body into a test case.
pub fn parse_str(text: &str, format: ScriptFormat) -> TestCase {
    let lines: Vec<String> = text.lines().map(|l| l.trim().to_string()).collect();
    parse_lines(&lines, format)
}

/// Load a script by filename or path.
///
/// A bare filename (no path separator) is resolved against `testcases_dir`;
/// anything containing a separator is treated as a filesystem path. The file
/// is read as UTF-8 and parsed according to its extension.
pub fn load_script(file_or_path: &str, testcases_dir: &Path) -> EngineResult<TestCase> {
    let path = resolve_script_path(file_or_path, testcases_dir);
    if !path.exists() {
        return Err(EngineError::ScriptNotFound(file_or_path.to_string()));
    }

    debug!("Loading script from {}", path.display());
    let text = std::fs::read_to_string(&path)?;
    Ok(parse_str(&text, ScriptFormat::from_path(&path)))
}

fn resolve_script_path(file_or_path: &str, testcases_dir: &Path) -> PathBuf {
    if file_or_path.contains('/') || file_or_path.contains('\\') {
        PathBuf::from(file_or_path)
    } else {
        testcases_dir.join(file_or_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casekit_common::types::DEFAULT_FEATURE_NAME;
    use std::io::Write;

    #[test]
    fn format_detection_by_extension() {
        assert_eq!(
            ScriptFormat::from_path(Path::new("login.feature")),
            ScriptFormat::Narrative
        );
        assert_eq!(
            ScriptFormat::from_path(Path::new("login.txt")),
            ScriptFormat::Legacy
        );
        assert_eq!(
            ScriptFormat::from_path(Path::new("login")),
            ScriptFormat::Legacy
        );
    }

    #[test]
    fn empty_script_yields_empty_case_with_placeholder_name() {
        let case = parse_str("", ScriptFormat::Legacy);
        assert!(case.steps.is_empty());
        assert_eq!(case.feature_name, DEFAULT_FEATURE_NAME);
        assert_eq!(case.event_listener, "");
    }

    #[test]
    fn all_comment_script_yields_zero_steps() {
        let text = "# just a comment\n-----\n# another one\n";
        let case = parse_str(text, ScriptFormat::Legacy);
        assert!(case.steps.is_empty());
        assert_eq!(case.feature_name, DEFAULT_FEATURE_NAME);
    }

    #[test]
    fn load_script_resolves_bare_names_against_testcases_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Feature: Sample").unwrap();
        writeln!(file, "click \"submit\"").unwrap();

        let case = load_script("sample.txt", dir.path()).unwrap();
        assert_eq!(case.feature_name, "Sample");
        assert_eq!(case.steps.len(), 1);
    }

    #[test]
    fn load_script_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_script("missing.txt", dir.path()).unwrap_err();
        assert!(matches!(err, EngineError::ScriptNotFound(_)));
    }
}
