//! Execution dispatcher
//!
//! Walks a test case's steps in authored order against one backend. The two
//! paths carry deliberately different failure policies: UI execution is
//! best-effort (each step's failure is caught, logged and the run continues)
//! while REST execution is strict (the first failure stops the sequence,
//! mirroring the body-contract semantics of an API test).

use std::time::Instant;

use casekit_common::types::{API_TEST_SENTINEL, GHERKIN_SENTINEL};
use casekit_common::{Action, Key, Step, TestCase};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::backend::http::{HttpBackend, HttpMethod};
use crate::backend::ui::UiDriver;
use crate::error::{EngineError, EngineResult};
use crate::locator::{LocatorConfig, LocatorResolver};

/// Which execution path a test case takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Ui,
    Rest,
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Ui => write!(f, "ui"),
            RunMode::Rest => write!(f, "rest"),
        }
    }
}

/// Result of executing a single step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub action: String,
    pub property: String,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Result of running a whole test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub feature: String,
    pub mode: RunMode,
    pub success: bool,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub duration_ms: u64,
    pub steps: Vec<StepOutcome>,
}

/// Walks the canonical steps and invokes the UI or REST backend per step.
pub struct TestRunner {
    resolver: LocatorResolver,
}

impl TestRunner {
    pub fn new() -> Self {
        Self {
            resolver: LocatorResolver::default(),
        }
    }

    pub fn with_locator_config(config: LocatorConfig) -> Self {
        Self {
            resolver: LocatorResolver::new(config),
        }
    }

    /// Classify a case: any HTTP verb or `ASSERT_BODY` routes the whole case
    /// to the REST path.
    pub fn classify(case: &TestCase) -> RunMode {
        if case.is_api() {
            RunMode::Rest
        } else {
            RunMode::Ui
        }
    }

    /// Run the UI path: navigate once, then execute each step best-effort.
    ///
    /// A navigation failure is [`EngineError::BackendUnavailable`] and
    /// terminates the run; every per-step failure is caught, logged with the
    /// offending action, and execution continues.
    pub async fn run_ui(
        &self,
        case: &TestCase,
        driver: &dyn UiDriver,
    ) -> EngineResult<RunReport> {
        let started_at = chrono::Utc::now();
        let start = Instant::now();

        if case.steps.is_empty() {
            warn!("Test case '{}' contains no steps", case.feature_name);
            return Ok(empty_report(case, RunMode::Ui));
        }

        if !navigable(&case.target_url) {
            return Err(EngineError::BackendUnavailable(format!(
                "no navigable target URL: '{}'",
                case.target_url
            )));
        }

        driver
            .navigate(&case.target_url)
            .await
            .map_err(|e| EngineError::BackendUnavailable(e.to_string()))?;

        let mut outcomes = Vec::with_capacity(case.steps.len());
        for step in &case.steps {
            let step_start = Instant::now();
            let result = self.execute_ui_step(step, driver).await;
            let duration_ms = step_start.elapsed().as_millis() as u64;

            match result {
                Ok(()) => outcomes.push(ok_outcome(step, duration_ms)),
                Err(e) => {
                    let wrapped = EngineError::StepFailed {
                        step: step.action.to_string(),
                        reason: e.to_string(),
                    };
                    error!("{}", wrapped);
                    outcomes.push(failed_outcome(step, duration_ms, &wrapped));
                }
            }
        }

        let success = outcomes.iter().all(|o| o.success);
        info!(
            "UI test '{}' finished: {}/{} steps ok",
            case.feature_name,
            outcomes.iter().filter(|o| o.success).count(),
            outcomes.len()
        );

        Ok(RunReport {
            feature: case.feature_name.clone(),
            mode: RunMode::Ui,
            success,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            steps: outcomes,
        })
    }

    async fn execute_ui_step(&self, step: &Step, driver: &dyn UiDriver) -> EngineResult<()> {
        match &step.action {
            Action::Type => {
                let element = self
                    .resolver
                    .resolve(driver, &step.locator_kind, &step.property)
                    .await?;
                element.clear().await?;
                element.send_keys(&step.value).await?;
            }
            Action::Click => {
                let element = self
                    .resolver
                    .resolve(driver, &step.locator_kind, &step.property)
                    .await?;
                element.click().await?;
            }
            Action::Keypress => match Key::from_name(&step.value) {
                Some(key) => {
                    let element = self
                        .resolver
                        .resolve(driver, &step.locator_kind, &step.property)
                        .await?;
                    element.send_keys(key.codepoint()).await?;
                }
                None => {
                    warn!("Unknown key name '{}', skipping keypress", step.value);
                }
            },
            Action::Assert => {
                let element = self
                    .resolver
                    .resolve(driver, &step.locator_kind, &step.property)
                    .await?;
                if !element.is_displayed().await? {
                    return Err(EngineError::AssertionFailed(format!(
                        "element '{}' is not visible",
                        step.property
                    )));
                }
                info!("Assertion passed: {}", step.property);
            }
            Action::Select => {
                warn!("'select' steps are not implemented, skipping '{}'", step.property);
            }
            other => {
                warn!("Unknown action '{}'", other);
            }
        }
        Ok(())
    }

    /// Run the REST path: each verb overwrites the last-response scratch
    /// value; `ASSERT_BODY` substring-checks it. The first failure stops the
    /// sequence.
    pub async fn run_rest(
        &self,
        case: &TestCase,
        http: &dyn HttpBackend,
    ) -> EngineResult<RunReport> {
        let started_at = chrono::Utc::now();
        let start = Instant::now();

        if case.steps.is_empty() {
            warn!("Test case '{}' contains no steps", case.feature_name);
            return Ok(empty_report(case, RunMode::Rest));
        }

        let mut last_response_body = String::new();
        let mut outcomes = Vec::with_capacity(case.steps.len());
        let mut success = true;

        for step in &case.steps {
            let step_start = Instant::now();
            let result =
                Self::execute_rest_step(step, http, &mut last_response_body).await;
            let duration_ms = step_start.elapsed().as_millis() as u64;

            match result {
                Ok(()) => outcomes.push(ok_outcome(step, duration_ms)),
                Err(e) => {
                    error!("REST step '{}' failed: {}", step.action, e);
                    outcomes.push(failed_outcome(step, duration_ms, &e));
                    success = false;
                    break;
                }
            }
        }

        info!(
            "REST test '{}' finished: {}",
            case.feature_name,
            if success { "ok" } else { "failed" }
        );

        Ok(RunReport {
            feature: case.feature_name.clone(),
            mode: RunMode::Rest,
            success,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            steps: outcomes,
        })
    }

    async fn execute_rest_step(
        step: &Step,
        http: &dyn HttpBackend,
        last_response_body: &mut String,
    ) -> EngineResult<()> {
        match HttpMethod::from_action(&step.action) {
            Some(method) => {
                let body = method.takes_body().then_some(step.value.as_str());
                let response = http.request(method, &step.property, body).await?;
                info!("{} {} -> {}", method, step.property, response.status);
                *last_response_body = response.body;
                Ok(())
            }
            None if step.action == Action::AssertBody => {
                if last_response_body.contains(&step.value) {
                    info!("Body contains: {}", step.value);
                    Ok(())
                } else {
                    Err(EngineError::AssertionFailed(format!(
                        "body does not contain expected text: {}",
                        step.value
                    )))
                }
            }
            None => {
                warn!("Unknown API action '{}'", step.action);
                Ok(())
            }
        }
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn navigable(target_url: &str) -> bool {
    !target_url.is_empty()
        && target_url != API_TEST_SENTINEL
        && target_url != GHERKIN_SENTINEL
}

fn empty_report(case: &TestCase, mode: RunMode) -> RunReport {
    RunReport {
        feature: case.feature_name.clone(),
        mode,
        success: true,
        started_at: chrono::Utc::now(),
        duration_ms: 0,
        steps: Vec::new(),
    }
}

fn ok_outcome(step: &Step, duration_ms: u64) -> StepOutcome {
    StepOutcome {
        action: step.action.to_string(),
        property: step.property.clone(),
        success: true,
        duration_ms,
        error: None,
    }
}

fn failed_outcome(step: &Step, duration_ms: u64, error: &EngineError) -> StepOutcome {
    StepOutcome {
        action: step.action.to_string(),
        property: step.property.clone(),
        success: false,
        duration_ms,
        error: Some(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{MockDriver, MockHttp};
    use crate::locator::LocatorConfig;
    use casekit_common::LocatorKind;
    use std::time::Duration;

    fn fast_runner() -> TestRunner {
        TestRunner::with_locator_config(LocatorConfig {
            title_wait: Duration::from_millis(20),
            poll_interval: Duration::from_millis(5),
        })
    }

    fn ui_case(steps: Vec<Step>) -> TestCase {
        TestCase::new("ui case", "https://example.org").with_steps(steps)
    }

    #[test]
    fn classification_routes_on_any_http_step() {
        let ui = ui_case(vec![Step::new(Action::Click, LocatorKind::Id, "go", "")]);
        assert_eq!(TestRunner::classify(&ui), RunMode::Ui);

        let api = TestCase::new("api", API_TEST_SENTINEL).with_steps(vec![
            Step::new(Action::Click, LocatorKind::Id, "go", ""),
            Step::assert_body("ok"),
        ]);
        assert_eq!(TestRunner::classify(&api), RunMode::Rest);
    }

    #[tokio::test]
    async fn ui_run_continues_past_failing_steps() {
        let driver = MockDriver::with_present(["first", "third"]);
        let runner = fast_runner();

        let case = ui_case(vec![
            Step::new(Action::Click, LocatorKind::Id, "first", ""),
            Step::new(Action::Click, LocatorKind::Id, "second", ""),
            Step::new(Action::Click, LocatorKind::Id, "third", ""),
        ]);

        let report = runner.run_ui(&case, &driver).await.unwrap();
        assert!(!report.success);
        assert_eq!(report.steps.len(), 3);
        assert!(report.steps[0].success);
        assert!(!report.steps[1].success);
        assert!(report.steps[2].success);

        // The third step really executed after the second failed.
        assert!(driver.log().contains(&"click third".to_string()));
    }

    #[tokio::test]
    async fn type_steps_clear_before_typing() {
        let driver = MockDriver::new();
        let runner = fast_runner();

        let case = ui_case(vec![Step::new(
            Action::Type,
            LocatorKind::Id,
            "searchInput",
            "capybara",
        )]);

        let report = runner.run_ui(&case, &driver).await.unwrap();
        assert!(report.success);

        let log = driver.log();
        let clear_pos = log.iter().position(|e| e == "clear searchInput").unwrap();
        let keys_pos = log
            .iter()
            .position(|e| e == "keys searchInput capybara")
            .unwrap();
        assert!(clear_pos < keys_pos);
    }

    #[tokio::test]
    async fn unknown_keys_are_skipped_not_fatal() {
        let driver = MockDriver::new();
        let runner = fast_runner();

        let case = ui_case(vec![Step::new(
            Action::Keypress,
            LocatorKind::Id,
            "searchInput",
            "HYPERDRIVE",
        )]);

        let report = runner.run_ui(&case, &driver).await.unwrap();
        assert!(report.success);
        // No element interaction happened for the skipped key.
        assert!(!driver.log().iter().any(|e| e.starts_with("keys")));
    }

    #[tokio::test]
    async fn known_keys_send_their_codepoint() {
        let driver = MockDriver::new();
        let runner = fast_runner();

        let case = ui_case(vec![Step::new(
            Action::Keypress,
            LocatorKind::Id,
            "searchInput",
            "ENTER",
        )]);

        runner.run_ui(&case, &driver).await.unwrap();
        assert!(driver
            .log()
            .contains(&format!("keys searchInput {}", "\u{E007}")));
    }

    #[tokio::test]
    async fn select_steps_warn_and_continue() {
        let driver = MockDriver::new();
        let runner = fast_runner();

        let case = ui_case(vec![
            Step::new(Action::Select, LocatorKind::Id, "dropdown", "Option A"),
            Step::new(Action::Click, LocatorKind::Id, "go", ""),
        ]);

        let report = runner.run_ui(&case, &driver).await.unwrap();
        assert!(report.success);
        assert!(driver.log().contains(&"click go".to_string()));
    }

    #[tokio::test]
    async fn navigation_failure_terminates_the_run() {
        let driver = MockDriver::failing_navigation();
        let runner = fast_runner();

        let case = ui_case(vec![Step::new(Action::Click, LocatorKind::Id, "go", "")]);
        let err = runner.run_ui(&case, &driver).await.unwrap_err();
        assert!(matches!(err, EngineError::BackendUnavailable(_)));
    }

    #[tokio::test]
    async fn sentinel_urls_are_not_navigated() {
        let driver = MockDriver::new();
        let runner = fast_runner();

        let case = TestCase::new("built", GHERKIN_SENTINEL)
            .with_steps(vec![Step::new(Action::Click, LocatorKind::Id, "go", "")]);

        let err = runner.run_ui(&case, &driver).await.unwrap_err();
        assert!(matches!(err, EngineError::BackendUnavailable(_)));
        assert!(driver.log().is_empty());
    }

    #[tokio::test]
    async fn empty_case_reports_success_with_no_steps() {
        let driver = MockDriver::new();
        let runner = fast_runner();

        let case = TestCase::new("empty", "https://example.org");
        let report = runner.run_ui(&case, &driver).await.unwrap();
        assert!(report.success);
        assert!(report.steps.is_empty());
    }

    #[tokio::test]
    async fn rest_run_asserts_against_last_response() {
        let http = MockHttp::with_bodies(["status: ok"]);
        let runner = fast_runner();

        let case = TestCase::new("api", API_TEST_SENTINEL).with_steps(vec![
            Step::http(Action::Get, "https://x/api", ""),
            Step::assert_body("ok"),
        ]);

        let report = runner.run_rest(&case, &http).await.unwrap();
        assert!(report.success);
        assert_eq!(report.steps.len(), 2);
    }

    #[tokio::test]
    async fn rest_assert_failure_stops_the_sequence() {
        let http = MockHttp::with_bodies(["status: fail", "never served"]);
        let runner = fast_runner();

        let case = TestCase::new("api", API_TEST_SENTINEL).with_steps(vec![
            Step::http(Action::Get, "https://x/api", ""),
            Step::assert_body("ok"),
            Step::http(Action::Get, "https://x/second", ""),
        ]);

        let report = runner.run_rest(&case, &http).await.unwrap();
        assert!(!report.success);
        // The failing assertion is recorded and nothing after it ran.
        assert_eq!(report.steps.len(), 2);
        assert_eq!(http.log(), vec!["GET https://x/api"]);
    }

    #[tokio::test]
    async fn post_steps_carry_the_value_as_body() {
        let http = MockHttp::with_bodies(["created"]);
        let runner = fast_runner();

        let case = TestCase::new("api", API_TEST_SENTINEL).with_steps(vec![Step::http(
            Action::Post,
            "https://x/api/items",
            r#"{"name":"a"}"#,
        )]);

        let report = runner.run_rest(&case, &http).await.unwrap();
        assert!(report.success);
        assert_eq!(
            http.log(),
            vec![r#"POST https://x/api/items {"name":"a"}"#]
        );
    }

    #[tokio::test]
    async fn unknown_rest_actions_warn_and_continue() {
        let http = MockHttp::with_bodies(["ok"]);
        let runner = fast_runner();

        let case = TestCase::new("api", API_TEST_SENTINEL).with_steps(vec![
            Step::new(Action::Unknown("PATCH".to_string()), LocatorKind::None, "https://x", ""),
            Step::http(Action::Get, "https://x/api", ""),
        ]);

        let report = runner.run_rest(&case, &http).await.unwrap();
        assert!(report.success);
        assert_eq!(http.log(), vec!["GET https://x/api"]);
    }
}
