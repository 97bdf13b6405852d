//! Interactive test-case builder
//!
//! Prompt-driven construction of the three test-case shapes: standard UI
//! steps, REST API steps with optional body assertions, and raw Gherkin
//! steps. The builder produces the same canonical model the parser does.

use anyhow::Result;
use casekit_common::types::{API_TEST_SENTINEL, GHERKIN_SENTINEL};
use casekit_common::{Action, LocatorKind, Step, TestCase};

use crate::console::{prompt, prompt_choice, prompt_yes_no};

/// Build a standard test case: metadata first, then UI or API steps.
pub fn build_from_input() -> Result<TestCase> {
    println!("\n🧱 Let's build your test case:");
    let feature_name = prompt("🔤 Feature name:")?;
    let target_url = prompt("🌐 Target URL:")?;
    println!("🎯 Event trigger (optional - leave blank if not needed):");
    let event_trigger = prompt("   e.g. 'onLoginSubmit':")?;

    let test_type = prompt_choice("Choose test type: (1) UI Steps (2) API Steps:", &["1", "2"])?;

    let mut steps = Vec::new();
    loop {
        if test_type == "2" {
            add_api_step(&mut steps)?;
        } else {
            add_ui_step(&mut steps)?;
        }

        if !prompt_yes_no("➕ Add another step?")? {
            break;
        }
    }

    println!("\n✅ Test case built successfully.");
    Ok(TestCase::new(feature_name, target_url)
        .with_event_listener(event_trigger)
        .with_steps(steps))
}

fn add_ui_step(steps: &mut Vec<Step>) -> Result<()> {
    println!("\n➕ Add a UI step:");
    let action = Action::parse(&prompt("🔧 Action (type, click, keypress):")?);
    let kind = LocatorKind::parse(&prompt("📍 Locator type (id, name, css, xpath, tag, alt):")?);
    let property = prompt("🔑 Locator value:")?;

    let value = if matches!(action, Action::Type | Action::Keypress) {
        prompt("💬 Value to input or key to press:")?
    } else {
        String::new()
    };

    steps.push(Step::new(action, kind, property, value));
    Ok(())
}

fn add_api_step(steps: &mut Vec<Step>) -> Result<()> {
    println!("\n➕ Add an API step:");
    let method = Action::parse(&prompt("🔧 HTTP Method (GET, POST, PUT, DELETE):")?);
    let endpoint = prompt("🌐 Target endpoint or URL:")?;

    let body = if matches!(method, Action::Post | Action::Put) {
        prompt("📦 Request body (JSON or text) [optional]:")?
    } else {
        String::new()
    };

    steps.push(Step::http(method, endpoint, body));

    if prompt_yes_no("🔎 Add assertion for expected text in response body?")? {
        let expected = prompt("✍️ Expected text to assert:")?;
        steps.push(Step::assert_body(expected));
    }

    Ok(())
}

/// Build a REST API test case. The target URL is the API sentinel: navigation
/// is step-driven.
pub fn build_api_test() -> Result<TestCase> {
    println!("\n🌐 Building REST API Test");
    let feature_name = prompt("🔤 Test name:")?;

    let mut steps = Vec::new();
    loop {
        add_api_step(&mut steps)?;

        if !prompt_yes_no("➕ Add another API step?")? {
            break;
        }
    }

    println!("✅ API test case built.");
    Ok(TestCase::new(feature_name, API_TEST_SENTINEL).with_steps(steps))
}

/// Build a Gherkin-style test case of raw keyword + description steps.
pub fn build_gherkin() -> Result<TestCase> {
    println!("\n🌿 Building Gherkin-style Test Case");
    let feature_name = prompt("🔤 Feature name:")?;

    let mut steps = Vec::new();
    loop {
        let keyword = prompt_choice(
            "🧩 Gherkin keyword (Given/When/Then/And):",
            &["Given", "When", "Then", "And"],
        )?;
        let description = prompt("📝 Step description:")?;

        steps.push(Step::new(
            Action::Gherkin,
            LocatorKind::parse(&keyword),
            description,
            "",
        ));

        if !prompt_yes_no("➕ Add another Gherkin step?")? {
            break;
        }
    }

    println!("✅ Gherkin test case built.");
    Ok(TestCase::new(feature_name, GHERKIN_SENTINEL).with_steps(steps))
}
