//! Locator resolution with ordered strategy fallback
//!
//! Source scripts intermix several addressing conventions without declaring
//! which one applies per line, so resolution guesses deterministically:
//! an `alt=` signal short-circuits to an alt-attribute lookup, a title signal
//! short-circuits to a bounded wait on the `title` attribute, and everything
//! else walks a fixed probe order until one strategy yields an element.

use std::time::{Duration, Instant};

use casekit_common::LocatorKind;
use tracing::{debug, info};

use crate::backend::ui::{By, Element, UiDriver};
use crate::error::{EngineError, EngineResult};

/// Timing knobs for the sole suspension point, the title-attribute wait.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    pub title_wait: Duration,
    pub poll_interval: Duration,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            title_wait: Duration::from_secs(10),
            poll_interval: Duration::from_millis(250),
        }
    }
}

/// Resolves a symbolic locator into exactly one element handle.
pub struct LocatorResolver {
    config: LocatorConfig,
}

impl LocatorResolver {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    /// Resolve `value` under the `kind` hint.
    ///
    /// The chain short-circuits on first success; only the title wait blocks,
    /// every other probe is a single immediate attempt. Exhausting all
    /// strategies yields [`EngineError::LocatorNotFound`] carrying the
    /// original locator text.
    pub async fn resolve(
        &self,
        driver: &dyn UiDriver,
        kind: &LocatorKind,
        value: &str,
    ) -> EngineResult<Box<dyn Element>> {
        // 1. alt= signal: alt-attribute equality only, no fallthrough.
        if let Some(alt) = alt_target(kind, value) {
            debug!("resolving '{}' by alt attribute", alt);
            let xpath = format!("//*[@alt='{}']", alt);
            return driver
                .find(By::Xpath, &xpath)
                .await
                .map_err(|_| EngineError::LocatorNotFound(value.to_string()));
        }

        // 2. Title signal: bounded wait on an exact title-attribute match.
        if let Some(title) = title_target(kind, value) {
            return self.wait_for_title(driver, &title, value).await;
        }

        // 3. Ordered probes; class name only when the value has no whitespace.
        let mut probes = vec![By::Id, By::Name, By::Css, By::Xpath];
        if !value.contains(char::is_whitespace) {
            probes.push(By::ClassName);
        }

        for by in probes {
            match driver.find(by, value).await {
                Ok(element) => {
                    debug!("resolved '{}' via {} strategy", value, by);
                    return Ok(element);
                }
                Err(_) => continue,
            }
        }

        Err(EngineError::LocatorNotFound(value.to_string()))
    }

    async fn wait_for_title(
        &self,
        driver: &dyn UiDriver,
        title: &str,
        original: &str,
    ) -> EngineResult<Box<dyn Element>> {
        let xpath = format!("//*[@title='{}']", title);
        let start = Instant::now();

        loop {
            if let Ok(element) = driver.find(By::Xpath, &xpath).await {
                if element.is_displayed().await.unwrap_or(false) {
                    info!("Assertion target visible: {}", title);
                    return Ok(element);
                }
            }

            if start.elapsed() >= self.config.title_wait {
                return Err(EngineError::LocatorNotFound(original.to_string()));
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}

impl Default for LocatorResolver {
    fn default() -> Self {
        Self::new(LocatorConfig::default())
    }
}

/// An `alt=` prefix on the value, or an explicit alt kind, selects the
/// alt-attribute strategy.
fn alt_target(kind: &LocatorKind, value: &str) -> Option<String> {
    if let Some(stripped) = value.strip_prefix("alt=") {
        return Some(stripped.trim().to_string());
    }
    if *kind == LocatorKind::Alt {
        return Some(value.trim().to_string());
    }
    None
}

/// A title kind, or a `title=` marker anywhere in the value, selects the
/// title-wait strategy. The extracted text drops the marker and a trailing
/// `]` left over from summary-form expressions.
fn title_target(kind: &LocatorKind, value: &str) -> Option<String> {
    if let Some(idx) = value.find("title=") {
        let mut text = value[idx + "title=".len()..].trim();
        if let Some(stripped) = text.strip_suffix(']') {
            text = stripped.trim_end();
        }
        return Some(text.to_string());
    }
    if *kind == LocatorKind::Title {
        return Some(value.trim().to_string());
    }
    None
}
