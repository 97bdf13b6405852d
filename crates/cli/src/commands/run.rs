//! `run` - parse a script and execute it against the matching backend

use anyhow::Result;
use casekit_common::TestCase;
use casekit_engine::backend::{RestClient, UiDriver, WebDriverSession};
use casekit_engine::parser::load_script;
use casekit_engine::runner::{RunMode, RunReport, StepOutcome, TestRunner};
use casekit_engine::serializer;
use clap::Args;
use colored::Colorize;
use tracing::warn;

use crate::config::CasekitConfig;
use crate::output::{self, OutputFormat, TableDisplay};

#[derive(Args)]
pub struct RunArgs {
    /// Script filename (resolved against the testcases directory) or path
    pub script: String,

    /// Override the configured WebDriver endpoint
    #[arg(long)]
    pub driver_url: Option<String>,
}

pub async fn execute(args: RunArgs, config: &CasekitConfig, format: OutputFormat) -> Result<()> {
    let case = load_script(&args.script, &config.testcases_dir)?;
    println!("{}", serializer::to_summary(&case));
    output::print_info(&format!(
        "Classified as {} test",
        TestRunner::classify(&case)
    ));

    let report = run_case(&case, config, args.driver_url.as_deref()).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => output::print_list(&report.steps, format),
    }

    if report.success {
        output::print_success("Test run complete.");
    } else {
        output::print_error("Test run finished with failures.");
        std::process::exit(1);
    }

    Ok(())
}

/// Classify the case and drive the matching backend. UI runs own one
/// WebDriver session for their whole duration.
pub(crate) async fn run_case(
    case: &TestCase,
    config: &CasekitConfig,
    driver_url: Option<&str>,
) -> Result<RunReport> {
    let runner = TestRunner::with_locator_config(config.locator_config());

    match TestRunner::classify(case) {
        RunMode::Rest => {
            let http = RestClient::new()?;
            Ok(runner.run_rest(case, &http).await?)
        }
        RunMode::Ui => {
            let session = WebDriverSession::connect(&config.webdriver_config(driver_url)).await?;
            let result = runner.run_ui(case, &session).await;
            if let Err(e) = session.quit().await {
                warn!("Failed to close WebDriver session: {}", e);
            }
            Ok(result?)
        }
    }
}

impl TableDisplay for StepOutcome {
    fn headers() -> Vec<&'static str> {
        vec!["Action", "Target", "Status", "Duration (ms)", "Error"]
    }

    fn row(&self) -> Vec<String> {
        let status = if self.success {
            "pass".green().to_string()
        } else {
            "fail".red().to_string()
        };
        vec![
            self.action.clone(),
            self.property.clone(),
            status,
            self.duration_ms.to_string(),
            self.error.clone().unwrap_or_default(),
        ]
    }
}
