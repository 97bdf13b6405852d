//! In-memory backend doubles
//!
//! Scriptable implementations of the capability traits used by the locator
//! and dispatcher test suites. The driver records every find and element
//! action into a shared log so tests can assert on exactly which strategies
//! were attempted and in what order.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backend::http::{HttpBackend, HttpMethod, HttpResponse};
use crate::backend::ui::{By, Element, UiDriver};
use crate::error::{EngineError, EngineResult};

type SharedLog = Arc<Mutex<Vec<String>>>;

/// A fake UI driver with a configurable set of locatable elements.
pub struct MockDriver {
    log: SharedLog,
    present: Option<Vec<String>>,
    hidden: Vec<String>,
    fail_navigate: bool,
}

impl MockDriver {
    /// A driver where every lookup succeeds.
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            present: None,
            hidden: Vec::new(),
            fail_navigate: false,
        }
    }

    /// A driver where only the named targets resolve. For attribute XPath
    /// lookups (`//*[@alt='x']`) the attribute value is matched.
    pub fn with_present<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            present: Some(values.into_iter().map(Into::into).collect()),
            ..Self::new()
        }
    }

    /// A driver whose navigation always fails.
    pub fn failing_navigation() -> Self {
        Self {
            fail_navigate: true,
            ..Self::new()
        }
    }

    /// Mark targets as locatable but not displayed.
    pub fn with_hidden<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden = values.into_iter().map(Into::into).collect();
        self
    }

    /// Snapshot of the recorded driver and element actions.
    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn is_present(&self, target: &str) -> bool {
        match &self.present {
            None => true,
            Some(values) => values.iter().any(|v| v == target),
        }
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the attribute value from `//*[@attr='value']` lookups.
fn xpath_attr_value(value: &str) -> Option<&str> {
    let start = value.find("='")? + 2;
    let end = value[start..].find("']")? + start;
    Some(&value[start..end])
}

#[async_trait]
impl UiDriver for MockDriver {
    async fn navigate(&self, url: &str) -> EngineResult<()> {
        self.log.lock().unwrap().push(format!("navigate {}", url));
        if self.fail_navigate {
            return Err(EngineError::WebDriver("navigation refused".to_string()));
        }
        Ok(())
    }

    async fn find(&self, by: By, value: &str) -> EngineResult<Box<dyn Element>> {
        self.log.lock().unwrap().push(format!("find {} {}", by, value));

        let target = xpath_attr_value(value).unwrap_or(value);
        if self.is_present(target) {
            Ok(Box::new(MockElement {
                name: target.to_string(),
                log: self.log.clone(),
                displayed: !self.hidden.iter().any(|h| h == target),
            }))
        } else {
            Err(EngineError::LocatorNotFound(value.to_string()))
        }
    }

    async fn page_title(&self) -> EngineResult<String> {
        Ok("mock page".to_string())
    }

    async fn page_source(&self) -> EngineResult<String> {
        Ok("<html></html>".to_string())
    }

    async fn quit(&self) -> EngineResult<()> {
        self.log.lock().unwrap().push("quit".to_string());
        Ok(())
    }
}

struct MockElement {
    name: String,
    log: SharedLog,
    displayed: bool,
}

#[async_trait]
impl Element for MockElement {
    async fn clear(&self) -> EngineResult<()> {
        self.log.lock().unwrap().push(format!("clear {}", self.name));
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> EngineResult<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("keys {} {}", self.name, text));
        Ok(())
    }

    async fn click(&self) -> EngineResult<()> {
        self.log.lock().unwrap().push(format!("click {}", self.name));
        Ok(())
    }

    async fn is_displayed(&self) -> EngineResult<bool> {
        Ok(self.displayed)
    }

    async fn attribute(&self, _name: &str) -> EngineResult<Option<String>> {
        Ok(Some(self.name.clone()))
    }
}

/// A fake REST backend returning queued responses.
pub struct MockHttp {
    log: SharedLog,
    responses: Mutex<VecDeque<HttpResponse>>,
}

impl MockHttp {
    /// Queue one 200 response per body, served in order. Once the queue is
    /// drained, further requests get an empty 200.
    pub fn with_bodies<I, S>(bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            responses: Mutex::new(
                bodies
                    .into_iter()
                    .map(|b| HttpResponse {
                        status: 200,
                        body: b.into(),
                    })
                    .collect(),
            ),
        }
    }

    /// Snapshot of the issued requests.
    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpBackend for MockHttp {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&str>,
    ) -> EngineResult<HttpResponse> {
        let entry = match body {
            Some(content) if !content.is_empty() => format!("{} {} {}", method, url, content),
            _ => format!("{} {}", method, url),
        };
        self.log.lock().unwrap().push(entry);

        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(HttpResponse {
                status: 200,
                body: String::new(),
            }))
    }
}
