//! W3C WebDriver wire-protocol adapter
//!
//! Drives a browser through a WebDriver-compatible endpoint (chromedriver,
//! geckodriver, a Selenium server) speaking plain JSON over HTTP. Each
//! session is created on connect and deleted on [`WebDriverSession::quit`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::backend::ui::{By, Element, UiDriver};
use crate::error::{EngineError, EngineResult};

/// The W3C element identifier key in find-element responses.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Configuration for a WebDriver session.
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    /// WebDriver endpoint, e.g. a local chromedriver
    pub endpoint: String,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:4444".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// A live browser session over the WebDriver wire protocol.
pub struct WebDriverSession {
    client: reqwest::Client,
    endpoint: String,
    session_id: String,
}

impl WebDriverSession {
    /// Create a new session against the configured endpoint.
    ///
    /// A failure to create the session surfaces as
    /// [`EngineError::BackendUnavailable`], which terminates a run before any
    /// step executes.
    pub async fn connect(config: &WebDriverConfig) -> EngineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        let payload = json!({"capabilities": {"alwaysMatch": {}}});

        let resp = client
            .post(format!("{}/session", endpoint))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                EngineError::BackendUnavailable(format!(
                    "cannot reach WebDriver at {}: {}",
                    endpoint, e
                ))
            })?;

        let body: Value = resp
            .json()
            .await
            .map_err(|e| EngineError::BackendUnavailable(format!("bad session response: {}", e)))?;

        let session_id = body["value"]["sessionId"]
            .as_str()
            .ok_or_else(|| {
                EngineError::BackendUnavailable(format!(
                    "WebDriver refused the session: {}",
                    body["value"]["message"].as_str().unwrap_or("no session id")
                ))
            })?
            .to_string();

        info!("WebDriver session {} created at {}", session_id, endpoint);

        Ok(Self {
            client,
            endpoint,
            session_id,
        })
    }

    fn session_url(&self, path: &str) -> String {
        format!("{}/session/{}{}", self.endpoint, self.session_id, path)
    }

    async fn post(&self, path: &str, body: Value) -> EngineResult<Value> {
        let resp = self
            .client
            .post(self.session_url(path))
            .json(&body)
            .send()
            .await?;
        unwrap_value(resp).await
    }

    async fn get(&self, path: &str) -> EngineResult<Value> {
        let resp = self.client.get(self.session_url(path)).send().await?;
        unwrap_value(resp).await
    }

    /// Map a [`By`] strategy to the wire-level `{using, value}` pair.
    /// Id, name and class compile down to CSS selectors.
    fn strategy(by: By, value: &str) -> (&'static str, String) {
        match by {
            By::Id => ("css selector", format!("#{}", value)),
            By::Name => ("css selector", format!("[name='{}']", value)),
            By::ClassName => ("css selector", format!(".{}", value)),
            By::Css => ("css selector", value.to_string()),
            By::Xpath => ("xpath", value.to_string()),
            By::TagName => ("tag name", value.to_string()),
        }
    }
}

#[async_trait]
impl UiDriver for WebDriverSession {
    async fn navigate(&self, url: &str) -> EngineResult<()> {
        debug!("navigate -> {}", url);
        self.post("/url", json!({"url": url})).await?;
        Ok(())
    }

    async fn find(&self, by: By, value: &str) -> EngineResult<Box<dyn Element>> {
        let (using, wire_value) = Self::strategy(by, value);
        debug!("find {} via {} '{}'", value, using, wire_value);

        let result = self
            .post("/element", json!({"using": using, "value": wire_value}))
            .await;

        let found = match result {
            Ok(v) => v,
            Err(EngineError::WebDriver(msg)) if msg.starts_with("no such element") => {
                return Err(EngineError::LocatorNotFound(value.to_string()));
            }
            Err(e) => return Err(e),
        };

        let element_id = found[ELEMENT_KEY]
            .as_str()
            .ok_or_else(|| EngineError::WebDriver("find response missing element id".to_string()))?
            .to_string();

        Ok(Box::new(WebDriverElement {
            client: self.client.clone(),
            base: self.session_url(&format!("/element/{}", element_id)),
        }))
    }

    async fn page_title(&self) -> EngineResult<String> {
        Ok(self.get("/title").await?.as_str().unwrap_or("").to_string())
    }

    async fn page_source(&self) -> EngineResult<String> {
        Ok(self.get("/source").await?.as_str().unwrap_or("").to_string())
    }

    async fn quit(&self) -> EngineResult<()> {
        debug!("deleting session {}", self.session_id);
        let resp = self
            .client
            .delete(format!("{}/session/{}", self.endpoint, self.session_id))
            .send()
            .await?;
        unwrap_value(resp).await?;
        Ok(())
    }
}

/// Handle to one element within a session.
struct WebDriverElement {
    client: reqwest::Client,
    base: String,
}

impl WebDriverElement {
    async fn post(&self, path: &str, body: Value) -> EngineResult<Value> {
        let resp = self
            .client
            .post(format!("{}{}", self.base, path))
            .json(&body)
            .send()
            .await?;
        unwrap_value(resp).await
    }

    async fn get(&self, path: &str) -> EngineResult<Value> {
        let resp = self
            .client
            .get(format!("{}{}", self.base, path))
            .send()
            .await?;
        unwrap_value(resp).await
    }
}

#[async_trait]
impl Element for WebDriverElement {
    async fn clear(&self) -> EngineResult<()> {
        self.post("/clear", json!({})).await?;
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> EngineResult<()> {
        self.post("/value", json!({"text": text})).await?;
        Ok(())
    }

    async fn click(&self) -> EngineResult<()> {
        self.post("/click", json!({})).await?;
        Ok(())
    }

    async fn is_displayed(&self) -> EngineResult<bool> {
        Ok(self.get("/displayed").await?.as_bool().unwrap_or(false))
    }

    async fn attribute(&self, name: &str) -> EngineResult<Option<String>> {
        let value = self.get(&format!("/attribute/{}", name)).await?;
        Ok(value.as_str().map(str::to_string))
    }
}

/// Unwrap the `value` envelope of a WebDriver response, converting error
/// payloads into [`EngineError::WebDriver`] with the wire error code first so
/// callers can match on it.
async fn unwrap_value(resp: reqwest::Response) -> EngineResult<Value> {
    let status = resp.status();
    let mut body: Value = resp.json().await?;
    let value = body
        .get_mut("value")
        .map(Value::take)
        .unwrap_or(Value::Null);

    if status.is_success() {
        return Ok(value);
    }

    let code = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    let message = value.get("message").and_then(Value::as_str).unwrap_or("");
    Err(EngineError::WebDriver(format!("{}: {}", code, message)))
}
