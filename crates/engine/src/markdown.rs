//! Markdown rendering of a test case
//!
//! A documentation-oriented export: feature heading, linked target URL,
//! numbered step list and the trigger footer.

use casekit_common::TestCase;

/// Render a test case as a markdown document.
pub fn to_markdown(case: &TestCase) -> String {
    let mut out = String::new();

    out.push_str(&format!("## 🧪 Feature: {}\n\n", case.feature_name));
    out.push_str(&format!(
        "**🌐 Target URL:** [{url}]({url})\n\n",
        url = case.target_url
    ));

    out.push_str("### 🔁 Steps:\n");
    for (i, step) in case.steps.iter().enumerate() {
        out.push_str(&format!(
            "{}. **{}** into `{}` → `{}`\n",
            i + 1,
            capitalize(step.action.as_str()),
            step.property,
            step.value
        ));
    }

    out.push_str(&format!("\n**🎯 Trigger:** `{}`\n", case.event_listener));
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casekit_common::{Action, LocatorKind, Step};

    #[test]
    fn markdown_contains_heading_and_steps() {
        let case = TestCase::new("Wiki search", "https://en.wikipedia.org")
            .with_event_listener("searchButton")
            .with_steps(vec![
                Step::new(Action::Type, LocatorKind::Id, "searchInput", "capybara"),
                Step::new(Action::Click, LocatorKind::Id, "searchButton", ""),
            ]);

        let md = to_markdown(&case);
        assert!(md.starts_with("## 🧪 Feature: Wiki search"));
        assert!(md.contains("1. **Type** into `searchInput` → `capybara`"));
        assert!(md.contains("2. **Click** into `searchButton` → ``"));
        assert!(md.contains("**🎯 Trigger:** `searchButton`"));
    }

    #[test]
    fn capitalize_handles_empty_and_upper() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("GET"), "Get");
        assert_eq!(capitalize("type"), "Type");
    }
}
