//! HTTP backend capability and the reqwest adapter

use std::time::Duration;

use async_trait::async_trait;
use casekit_common::Action;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineResult;

/// HTTP method an API step can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Map a step action to a method. `ASSERT_BODY` and UI verbs map to
    /// `None`: they never issue a request.
    pub fn from_action(action: &Action) -> Option<Self> {
        match action {
            Action::Get => Some(HttpMethod::Get),
            Action::Post => Some(HttpMethod::Post),
            Action::Put => Some(HttpMethod::Put),
            Action::Delete => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// POST and PUT carry the step's value as the request body.
    pub fn takes_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status and body of one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// REST capability the dispatcher drives on the API path.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&str>,
    ) -> EngineResult<HttpResponse>;
}

/// reqwest-backed REST client.
pub struct RestClient {
    client: reqwest::Client,
}

impl RestClient {
    pub fn new() -> EngineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for RestClient {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&str>,
    ) -> EngineResult<HttpResponse> {
        debug!("{} {}", method, url);

        let request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        let request = match body {
            Some(content) => request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(content.to_string()),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_http_verbs_map_to_methods() {
        assert_eq!(HttpMethod::from_action(&Action::Get), Some(HttpMethod::Get));
        assert_eq!(
            HttpMethod::from_action(&Action::Delete),
            Some(HttpMethod::Delete)
        );
        assert_eq!(HttpMethod::from_action(&Action::AssertBody), None);
        assert_eq!(HttpMethod::from_action(&Action::Click), None);
    }

    #[test]
    fn post_and_put_take_bodies() {
        assert!(HttpMethod::Post.takes_body());
        assert!(HttpMethod::Put.takes_body());
        assert!(!HttpMethod::Get.takes_body());
        assert!(!HttpMethod::Delete.takes_body());
    }
}
