//! Legacy/structured dialect parser
//!
//! Each non-empty line is tested against [`RULES`] in order; the first rule
//! that matches consumes the line and the rest are skipped. Several surface
//! syntaxes overlap textually (a `click "..."` line also contains a quoted
//! string), so the rule order is the disambiguation policy and must not be
//! reordered.

use casekit_common::types::DEFAULT_FEATURE_NAME;
use casekit_common::{Action, LocatorKind, Step, TestCase};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Outcome of matching one line against one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedLine {
    Feature(String),
    TargetUrl(String),
    EventTrigger(String),
    Step(Step),
}

type Rule = fn(&str) -> Option<ParsedLine>;

/// The ordered rule chain. First match wins.
const RULES: &[Rule] = &[
    rule_feature,
    rule_target_url,
    rule_event_trigger,
    rule_summary_step,
    rule_structured_step,
    rule_keypress,
    rule_enter,
    rule_select,
    rule_assert,
    rule_click,
];

pub(crate) fn parse_legacy(lines: &[String]) -> TestCase {
    let mut case = TestCase::new("", "");
    let mut steps = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match RULES.iter().find_map(|rule| rule(line)) {
            Some(ParsedLine::Feature(name)) => case.feature_name = name,
            Some(ParsedLine::TargetUrl(url)) => case.target_url = url,
            Some(ParsedLine::EventTrigger(listener)) => case.event_listener = listener,
            Some(ParsedLine::Step(step)) => steps.push(step),
            None => debug!("No rule matched, skipping line: {}", line),
        }
    }

    if case.feature_name.is_empty() {
        case.feature_name = DEFAULT_FEATURE_NAME.to_string();
    }

    case.steps = steps;
    case
}

/// Match a header line: optional decorative prefix glyphs, the keyword
/// (case-insensitive, colon included), then the value.
fn header_value(line: &str, keyword: &str) -> Option<String> {
    let start = line.find(|c: char| c.is_alphabetic())?;
    let stripped = &line[start..];
    let head = stripped.get(..keyword.len())?;
    if head.eq_ignore_ascii_case(keyword) {
        Some(stripped[keyword.len()..].trim().to_string())
    } else {
        None
    }
}

fn rule_feature(line: &str) -> Option<ParsedLine> {
    header_value(line, "feature:").map(ParsedLine::Feature)
}

fn rule_target_url(line: &str) -> Option<ParsedLine> {
    if let Some(url) = header_value(line, "target url:") {
        return Some(ParsedLine::TargetUrl(url));
    }
    // Narrative interop: the serializer opens its output with `navigate to`.
    let lower = line.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("navigate to ") {
        let url = line[line.len() - rest.len()..].trim().to_string();
        return Some(ParsedLine::TargetUrl(url));
    }
    None
}

fn rule_event_trigger(line: &str) -> Option<ParsedLine> {
    header_value(line, "event trigger:").map(ParsedLine::EventTrigger)
}

static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+\.\s+\[(.*?)\]\s+using\s+\[(.*?)=(.*?)\]\s+=> ?(.*)").unwrap()
});

/// Numbered summary form: `N. [action] using [kind=property] => value`
fn rule_summary_step(line: &str) -> Option<ParsedLine> {
    let caps = SUMMARY_RE.captures(line)?;
    Some(ParsedLine::Step(Step::new(
        Action::parse(caps[1].trim()),
        LocatorKind::parse(caps[2].trim()),
        caps[3].trim(),
        caps[4].trim(),
    )))
}

static STRUCTURED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Action:\s*(\w+),\s*Locator Type:\s*([^,]*),\s*Locator Value:\s*([^,]*),\s*Value:\s*(.*)")
        .unwrap()
});

/// Structured key-value form: `Action: X, Locator Type: Y, Locator Value: Z, Value: W`
fn rule_structured_step(line: &str) -> Option<ParsedLine> {
    let caps = STRUCTURED_RE.captures(line)?;
    Some(ParsedLine::Step(Step::new(
        Action::parse(caps[1].trim()),
        LocatorKind::parse(caps[2].trim()),
        caps[3].trim(),
        caps[4].trim(),
    )))
}

static KEYPRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"keypress\s+"(.*?)"\s+key\s+in\s+"(.*?)""#).unwrap());

fn rule_keypress(line: &str) -> Option<ParsedLine> {
    let caps = KEYPRESS_RE.captures(line)?;
    Some(ParsedLine::Step(Step::new(
        Action::Keypress,
        LocatorKind::Id,
        caps[2].trim(),
        caps[1].trim(),
    )))
}

static ENTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"enter\s+"(.*?)"\s+into\s+"(.*?)""#).unwrap());

fn rule_enter(line: &str) -> Option<ParsedLine> {
    let caps = ENTER_RE.captures(line)?;
    Some(ParsedLine::Step(Step::new(
        Action::Type,
        LocatorKind::Id,
        caps[2].trim(),
        caps[1].trim(),
    )))
}

static SELECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"select\s+"(.*?)"\s+from\s+"(.*?)""#).unwrap());

/// `select "<value>" from "<field>"`, the serializer's select rendering.
fn rule_select(line: &str) -> Option<ParsedLine> {
    let caps = SELECT_RE.captures(line)?;
    Some(ParsedLine::Step(Step::new(
        Action::Select,
        LocatorKind::Id,
        caps[2].trim(),
        caps[1].trim(),
    )))
}

static ASSERT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"assert\s+"(.*?)""#).unwrap());

/// `assert "<expr>"` where `<expr>` may carry a `kind=value` prefix;
/// without one the kind defaults to `id`.
fn rule_assert(line: &str) -> Option<ParsedLine> {
    let caps = ASSERT_RE.captures(line)?;
    let raw = caps[1].trim();

    let (kind, value) = match raw.split_once('=') {
        Some((k, v)) => (LocatorKind::parse(k.trim()), v.trim()),
        None => (LocatorKind::Id, raw),
    };

    Some(ParsedLine::Step(Step::new(Action::Assert, kind, value, "")))
}

static CLICK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"click\s+"(.*?)""#).unwrap());

/// `click "<expr>"` where a leading `alt=` switches the kind to `alt`.
fn rule_click(line: &str) -> Option<ParsedLine> {
    let caps = CLICK_RE.captures(line)?;
    let raw = caps[1].trim();

    let (kind, value) = match raw.strip_prefix("alt=") {
        Some(stripped) => (LocatorKind::Alt, stripped.trim()),
        None => (LocatorKind::Id, raw),
    };

    Some(ParsedLine::Step(Step::new(Action::Click, kind, value, "")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_of(parsed: Option<ParsedLine>) -> Step {
        match parsed {
            Some(ParsedLine::Step(step)) => step,
            other => panic!("expected a step, got {:?}", other),
        }
    }

    #[test]
    fn feature_header_tolerates_glyphs_and_case() {
        assert_eq!(
            rule_feature("🧪 Feature: Wiki search"),
            Some(ParsedLine::Feature("Wiki search".to_string()))
        );
        assert_eq!(
            rule_feature("feature: lowercase works"),
            Some(ParsedLine::Feature("lowercase works".to_string()))
        );
        assert_eq!(rule_feature("Action: click, ..."), None);
    }

    #[test]
    fn target_url_header_and_navigate_form() {
        assert_eq!(
            rule_target_url("🌐 Target URL: https://en.wikipedia.org"),
            Some(ParsedLine::TargetUrl("https://en.wikipedia.org".to_string()))
        );
        assert_eq!(
            rule_target_url("navigate to https://en.wikipedia.org/wiki/Main_Page"),
            Some(ParsedLine::TargetUrl(
                "https://en.wikipedia.org/wiki/Main_Page".to_string()
            ))
        );
    }

    #[test]
    fn event_trigger_header() {
        assert_eq!(
            rule_event_trigger("Event Trigger: searchButton"),
            Some(ParsedLine::EventTrigger("searchButton".to_string()))
        );
    }

    #[test]
    fn summary_step_captures_four_groups() {
        let step = step_of(rule_summary_step(
            "1. [type] using [id=searchInput] => capybara",
        ));
        assert_eq!(step.action, Action::Type);
        assert_eq!(step.locator_kind, LocatorKind::Id);
        assert_eq!(step.property, "searchInput");
        assert_eq!(step.value, "capybara");
    }

    #[test]
    fn summary_step_allows_empty_value() {
        let step = step_of(rule_summary_step("2. [click] using [id=searchButton] => "));
        assert_eq!(step.action, Action::Click);
        assert_eq!(step.value, "");
    }

    #[test]
    fn structured_step_with_empty_kind_and_value() {
        let step = step_of(rule_structured_step(
            "Action: GET, Locator Type: , Locator Value: https://example.org/api, Value: ",
        ));
        assert_eq!(step.action, Action::Get);
        assert_eq!(step.locator_kind, LocatorKind::None);
        assert_eq!(step.property, "https://example.org/api");
        assert_eq!(step.value, "");
    }

    #[test]
    fn keypress_line() {
        let step = step_of(rule_keypress(r#"keypress "ENTER" key in "searchInput""#));
        assert_eq!(step.action, Action::Keypress);
        assert_eq!(step.locator_kind, LocatorKind::Id);
        assert_eq!(step.property, "searchInput");
        assert_eq!(step.value, "ENTER");
    }

    #[test]
    fn enter_line_defaults_to_id() {
        let step = step_of(rule_enter(r#"enter "hello" into "search""#));
        assert_eq!(step.action, Action::Type);
        assert_eq!(step.locator_kind, LocatorKind::Id);
        assert_eq!(step.property, "search");
        assert_eq!(step.value, "hello");
    }

    #[test]
    fn select_line() {
        let step = step_of(rule_select(r#"select "en" from "lang""#));
        assert_eq!(step.action, Action::Select);
        assert_eq!(step.property, "lang");
        assert_eq!(step.value, "en");
    }

    #[test]
    fn assert_line_splits_kind_on_equals() {
        let step = step_of(rule_assert(r#"assert "title=Capybara""#));
        assert_eq!(step.action, Action::Assert);
        assert_eq!(step.locator_kind, LocatorKind::Title);
        assert_eq!(step.property, "Capybara");

        let step = step_of(rule_assert(r#"assert "resultsHeader""#));
        assert_eq!(step.locator_kind, LocatorKind::Id);
        assert_eq!(step.property, "resultsHeader");
    }

    #[test]
    fn click_line_strips_alt_prefix() {
        let step = step_of(rule_click(r#"click "alt=Example""#));
        assert_eq!(step.action, Action::Click);
        assert_eq!(step.locator_kind, LocatorKind::Alt);
        assert_eq!(step.property, "Example");

        let step = step_of(rule_click(r#"click "submit""#));
        assert_eq!(step.locator_kind, LocatorKind::Id);
        assert_eq!(step.property, "submit");
    }

    #[test]
    fn summary_rule_wins_over_narrative_rules() {
        // This line satisfies both the summary pattern and the click pattern;
        // the summary rule is earlier in the chain and must win.
        let line = r#"3. [click] using [id=click "ok"] => "#;
        let case = parse_legacy(&[line.to_string()]);
        assert_eq!(case.steps.len(), 1);
        assert_eq!(case.steps[0].action, Action::Click);
        assert_eq!(case.steps[0].locator_kind, LocatorKind::Id);
        assert_eq!(case.steps[0].property, r#"click "ok""#);
    }

    #[test]
    fn unmatched_lines_are_dropped_silently() {
        let lines = vec![
            "----- decorative -----".to_string(),
            "# comment".to_string(),
            r#"click "go""#.to_string(),
        ];
        let case = parse_legacy(&lines);
        assert_eq!(case.steps.len(), 1);
    }

    #[test]
    fn full_legacy_script() {
        let lines: Vec<String> = [
            "🧪 Feature: Wiki search",
            "🌐 Target URL: https://en.wikipedia.org/wiki/Main_Page",
            "",
            r#"enter "capybara" into "searchInput""#,
            r#"keypress "ENTER" key in "searchInput""#,
            r#"assert "title=Capybara""#,
            "🎯 Event Trigger: searchButton",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let case = parse_legacy(&lines);
        assert_eq!(case.feature_name, "Wiki search");
        assert_eq!(case.target_url, "https://en.wikipedia.org/wiki/Main_Page");
        assert_eq!(case.event_listener, "searchButton");
        assert_eq!(case.steps.len(), 3);
        assert_eq!(case.steps[1].action, Action::Keypress);
        assert_eq!(case.steps[2].locator_kind, LocatorKind::Title);
    }
}
