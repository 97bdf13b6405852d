//! Narrative (`.feature`) dialect parser
//!
//! Lines beginning with a Gherkin keyword are forwarded, keyword stripped, to
//! a step-level sub-parser. A narrative line matching none of the known
//! sentence shapes becomes an `unknown` action step carrying the raw text as
//! its value, so no input is ever lost and parsing never fails.

use casekit_common::types::{GHERKIN_FEATURE_NAME, GHERKIN_SENTINEL};
use casekit_common::{Action, LocatorKind, Step, TestCase};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static GHERKIN_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(Given|When|Then|And)\b\s*(.*)$").unwrap());

static ENTER_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)enter\s+"(.*?)"\s+into\s+the\s+"(.*?)"\s+field"#).unwrap());

static PRESS_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)press\s+the\s+"(.*?)"\s+key\s+in\s+the\s+"(.*?)"\s+field"#).unwrap()
});

static SEE_ARTICLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)see\s+the\s+"(.*?)"\s+article\s+page"#).unwrap());

pub(crate) fn parse_narrative(lines: &[String]) -> TestCase {
    let mut case = TestCase::new("", GHERKIN_SENTINEL);
    let mut steps = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix("Feature:") {
            case.feature_name = name.trim().to_string();
        } else if line.starts_with("Scenario:") {
            // Scenario headings carry no step content.
        } else if let Some(caps) = GHERKIN_LINE_RE.captures(line) {
            steps.push(parse_narrative_step(caps[2].trim()));
        } else {
            debug!("Skipping non-step narrative line: {}", line);
        }
    }

    if case.feature_name.is_empty() {
        case.feature_name = GHERKIN_FEATURE_NAME.to_string();
    }

    case.steps = steps;
    case
}

/// Parse one keyword-stripped narrative sentence into a step.
///
/// Always yields a step: unrecognized sentences fall back to an `unknown`
/// action carrying the raw text, giving the execution layer a place to report
/// the step instead of the parser rejecting it.
fn parse_narrative_step(text: &str) -> Step {
    if let Some(caps) = ENTER_FIELD_RE.captures(text) {
        return Step::new(Action::Type, LocatorKind::Name, caps[2].trim(), caps[1].trim());
    }

    if let Some(caps) = PRESS_FIELD_RE.captures(text) {
        return Step::new(
            Action::Keypress,
            LocatorKind::Name,
            caps[2].trim(),
            caps[1].trim(),
        );
    }

    if let Some(caps) = SEE_ARTICLE_RE.captures(text) {
        return Step::new(Action::Assert, LocatorKind::Title, caps[1].trim(), "");
    }

    Step::new(
        Action::Unknown("unknown".to_string()),
        LocatorKind::Text,
        "unknown",
        text,
    )
}
