//! Text serializer: canonical model back to script text
//!
//! The inverse of the parser. Legacy mode writes the structured key-value
//! form; narrative mode writes the sentence templates the legacy parser also
//! understands, which is what makes save/load round-trips work.

use std::path::Path;

use casekit_common::{Action, LocatorKind, TestCase};
use tracing::info;

use crate::error::EngineResult;

/// Output dialect for [`render`] and [`save_to_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializeMode {
    /// Header block plus one `Action: ...` line per step
    Legacy,
    /// `navigate to` plus one sentence per step
    Narrative,
}

/// Render a test case in the requested dialect.
pub fn render(case: &TestCase, mode: SerializeMode) -> String {
    match mode {
        SerializeMode::Legacy => to_legacy(case),
        SerializeMode::Narrative => {
            let mut text = to_narrative_lines(case).join("\n");
            text.push('\n');
            text
        }
    }
}

/// Legacy structured rendering: one header block, then one key-value line per
/// step.
pub fn to_legacy(case: &TestCase) -> String {
    let mut out = String::new();
    out.push_str(&format!("Feature: {}\n", case.feature_name));
    out.push_str(&format!("Target URL: {}\n", case.target_url));
    out.push_str(&format!("Event Trigger: {}\n\n", case.event_listener));

    for step in &case.steps {
        out.push_str(&format!(
            "Action: {}, Locator Type: {}, Locator Value: {}, Value: {}\n",
            step.action, step.locator_kind, step.property, step.value
        ));
    }

    out
}

/// Narrative rendering: a `navigate to` line, one sentence per step chosen by
/// a fixed action mapping, and an optional trailing event-listener click.
pub fn to_narrative_lines(case: &TestCase) -> Vec<String> {
    let mut lines = Vec::with_capacity(case.steps.len() + 2);
    lines.push(format!("navigate to {}", case.target_url));

    for step in &case.steps {
        let line = match &step.action {
            Action::Type => format!(r#"enter "{}" into "{}""#, step.value, step.property),
            Action::Click => {
                // The alt= prefix survives the trip back through the click rule.
                if step.locator_kind == LocatorKind::Alt {
                    format!(r#"click "alt={}""#, step.property)
                } else {
                    format!(r#"click "{}""#, step.property)
                }
            }
            Action::Select => format!(r#"select "{}" from "{}""#, step.value, step.property),
            Action::Keypress => format!(r#"keypress "{}" key in "{}""#, step.value, step.property),
            Action::Assert => format!(
                r#"assert "{}={}""#,
                step.locator_kind, step.property
            ),
            other => format!(r#"# Unknown action "{}" for "{}""#, other, step.property),
        };
        lines.push(line);
    }

    if !case.event_listener.is_empty() {
        lines.push(format!(r#"click "{}" button"#, case.event_listener));
    }

    lines
}

/// Numbered summary block, the form shown by the CLI and accepted back by the
/// summary-step parse rule.
pub fn to_summary(case: &TestCase) -> String {
    let mut out = String::new();
    out.push_str("======= TEST CASE SUMMARY =======\n");
    out.push_str(&format!("🧪 Feature:         {}\n", case.feature_name));
    out.push_str(&format!("🌐 Target URL:      {}\n\n", case.target_url));

    out.push_str("🔁 Steps:\n");
    for (i, step) in case.steps.iter().enumerate() {
        out.push_str(&format!(
            "  {}. [{}] using [{}={}] => {}\n",
            i + 1,
            step.action,
            step.locator_kind,
            step.property,
            step.value
        ));
    }

    out.push_str(&format!("\n🎯 Event Trigger: {}\n", case.event_listener));
    out.push_str("=================================\n");
    out
}

/// Write the rendering to a file.
pub fn save_to_file(case: &TestCase, path: &Path, mode: SerializeMode) -> EngineResult<()> {
    std::fs::write(path, render(case, mode))?;
    info!("Test case saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_str, ScriptFormat};
    use casekit_common::Step;

    fn sample_case() -> TestCase {
        TestCase::new("Wiki search", "https://en.wikipedia.org/wiki/Main_Page")
            .with_event_listener("searchButton")
            .with_steps(vec![
                Step::new(Action::Type, LocatorKind::Id, "searchInput", "capybara"),
                Step::new(Action::Keypress, LocatorKind::Id, "searchInput", "ENTER"),
                Step::new(Action::Click, LocatorKind::Alt, "Logo", ""),
                Step::new(Action::Assert, LocatorKind::Title, "Capybara", ""),
            ])
    }

    #[test]
    fn legacy_rendering_shape() {
        let text = to_legacy(&sample_case());
        assert!(text.starts_with("Feature: Wiki search\n"));
        assert!(text.contains("Target URL: https://en.wikipedia.org/wiki/Main_Page\n"));
        assert!(text.contains(
            "Action: type, Locator Type: id, Locator Value: searchInput, Value: capybara"
        ));
        assert!(text.contains("Action: assert, Locator Type: title, Locator Value: Capybara, Value: "));
    }

    #[test]
    fn legacy_round_trip_is_idempotent() {
        let case = sample_case();
        let once = parse_str(&to_legacy(&case), ScriptFormat::Legacy);
        assert_eq!(once.steps, case.steps);
        assert_eq!(once.feature_name, case.feature_name);
        assert_eq!(once.event_listener, case.event_listener);

        let twice = parse_str(&to_legacy(&once), ScriptFormat::Legacy);
        assert_eq!(twice, once);
    }

    #[test]
    fn narrative_rendering_shape() {
        let lines = to_narrative_lines(&sample_case());
        assert_eq!(lines[0], "navigate to https://en.wikipedia.org/wiki/Main_Page");
        assert_eq!(lines[1], r#"enter "capybara" into "searchInput""#);
        assert_eq!(lines[2], r#"keypress "ENTER" key in "searchInput""#);
        assert_eq!(lines[3], r#"click "alt=Logo""#);
        assert_eq!(lines[4], r#"assert "title=Capybara""#);
        assert_eq!(lines[5], r#"click "searchButton" button"#);
    }

    #[test]
    fn narrative_round_trip_preserves_triples() {
        let case = sample_case();
        let text = render(&case, SerializeMode::Narrative);
        let back = parse_str(&text, ScriptFormat::Legacy);

        // The trailing event-listener line re-parses as a click step.
        assert_eq!(back.steps.len(), case.steps.len() + 1);
        assert_eq!(back.target_url, case.target_url);

        assert_eq!(back.steps[0].action, Action::Type);
        assert_eq!(back.steps[0].property, "searchInput");
        assert_eq!(back.steps[0].value, "capybara");

        assert_eq!(back.steps[2].locator_kind, LocatorKind::Alt);
        assert_eq!(back.steps[2].property, "Logo");

        assert_eq!(back.steps[3].locator_kind, LocatorKind::Title);
        assert_eq!(back.steps[3].property, "Capybara");
    }

    #[test]
    fn unknown_actions_render_as_comment_lines() {
        let case = TestCase::new("x", "https://example.org").with_steps(vec![Step::new(
            Action::Unknown("swipe".to_string()),
            LocatorKind::Id,
            "carousel",
            "",
        )]);
        let lines = to_narrative_lines(&case);
        assert_eq!(lines[1], r#"# Unknown action "swipe" for "carousel""#);

        // Comment lines are dropped on re-parse rather than failing.
        let back = parse_str(&lines.join("\n"), ScriptFormat::Legacy);
        assert!(back.steps.is_empty());
    }

    #[test]
    fn summary_block_round_trips_through_summary_rule() {
        let case = sample_case();
        let summary = to_summary(&case);
        let back = parse_str(&summary, ScriptFormat::Legacy);
        assert_eq!(back.steps, case.steps);
        assert_eq!(back.feature_name, case.feature_name);
    }
}
