//! Interactive console flow
//!
//! The menu loop: load or build a test case, show its summary, offer to run
//! and save it, repeat. Kept deliberately thin; parsing, execution and
//! serialization all live in the engine.

use std::path::Path;

use anyhow::Result;
use casekit_common::TestCase;
use casekit_engine::discovery::discover_scripts;
use casekit_engine::parser::load_script;
use casekit_engine::serializer::{self, SerializeMode};

use crate::builder;
use crate::commands::run::run_case;
use crate::config::CasekitConfig;
use crate::output;

pub async fn run(config: &CasekitConfig) -> Result<()> {
    println!("🎉 Welcome to Casekit!");

    loop {
        let case = match acquire_case(config)? {
            Some(case) => case,
            None => continue,
        };

        println!("{}", serializer::to_summary(&case));
        offer_run_and_save(&case, config).await?;

        if !prompt_yes_no("Create another test case?")? {
            break;
        }
    }

    println!("👋 Exiting Casekit. Goodbye!");
    Ok(())
}

/// Offer to execute and persist a freshly loaded or built case.
pub(crate) async fn offer_run_and_save(case: &TestCase, config: &CasekitConfig) -> Result<()> {
    if prompt_yes_no("Run this test case now?")? {
        match run_case(case, config, None).await {
            Ok(report) if report.success => output::print_success("Test run complete."),
            Ok(_) => output::print_error("Test run finished with failures."),
            Err(e) => output::print_error(&format!("Test failed: {}", e)),
        }
    }

    if prompt_yes_no("Would you like to save this test case?")? {
        let style = prompt_choice("Choose save format: (1) Standard  (2) Narrative", &["1", "2"])?;
        let filename = prompt("Enter filename to save to (e.g. test.txt):")?;
        let mode = if style == "2" {
            SerializeMode::Narrative
        } else {
            SerializeMode::Legacy
        };

        match serializer::save_to_file(case, Path::new(&filename), mode) {
            Ok(()) => println!("💾 Test case saved to: {}", filename),
            Err(e) => output::print_error(&format!("Failed to save test case: {}", e)),
        }
    }

    Ok(())
}

fn acquire_case(config: &CasekitConfig) -> Result<Option<TestCase>> {
    println!("How would you like to create a test?");
    println!("1. Load from file");
    println!("2. Create new test case");

    let method = prompt_choice("Select option [1/2]:", &["1", "2"])?;
    if method == "1" {
        load_flow(config)
    } else {
        build_new_case().map(Some)
    }
}

fn load_flow(config: &CasekitConfig) -> Result<Option<TestCase>> {
    println!("Select test type to load:");
    println!("1. Legacy script (*.txt)");
    println!("2. Narrative feature (*.feature)");

    let style = prompt_choice("Choose [1/2]:", &["1", "2"])?;
    let extension = if style == "2" { "feature" } else { "txt" };

    let files = discover_scripts(&config.testcases_dir, extension)?;
    if files.is_empty() {
        output::print_warning("No test cases found for that type.");
        return Ok(None);
    }

    println!("Available test cases:");
    for (i, file) in files.iter().enumerate() {
        println!(
            "{}. {}",
            i + 1,
            file.file_name().unwrap_or_default().to_string_lossy()
        );
    }

    let choice = prompt("Enter number to load:")?;
    let selected = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| files.get(i));

    let Some(path) = selected else {
        output::print_error("Invalid selection.");
        return Ok(None);
    };

    match load_script(&path.to_string_lossy(), &config.testcases_dir) {
        Ok(case) => Ok(Some(case)),
        Err(e) => {
            output::print_error(&format!("Failed to load test case: {}", e));
            Ok(None)
        }
    }
}

/// Choose a builder flow and run it.
pub(crate) fn build_new_case() -> Result<TestCase> {
    println!("Which type of test case do you want to create?");
    println!("1. Standard UI Test");
    println!("2. Gherkin Feature Test");
    println!("3. REST API Test");

    match prompt_choice("Select [1/2/3]:", &["1", "2", "3"])?.as_str() {
        "2" => builder::build_gherkin(),
        "3" => builder::build_api_test(),
        _ => builder::build_from_input(),
    }
}

pub(crate) fn prompt(message: &str) -> Result<String> {
    println!("{}", message);
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub(crate) fn prompt_yes_no(message: &str) -> Result<bool> {
    loop {
        match prompt(&format!("{} [y/n]", message))?.to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => continue,
        }
    }
}

pub(crate) fn prompt_choice(message: &str, options: &[&str]) -> Result<String> {
    loop {
        let input = prompt(message)?;
        if options.contains(&input.as_str()) {
            return Ok(input);
        }
    }
}
