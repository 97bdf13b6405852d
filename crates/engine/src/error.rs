//! Error types for the Casekit engine

use thiserror::Error;

/// Result type alias using [`EngineError`]
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Script not found: {0}")]
    ScriptNotFound(String),

    #[error("Element not found with any strategy for: {0}")]
    LocatorNotFound(String),

    #[error("Step failed: {step} - {reason}")]
    StepFailed { step: String, reason: String },

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("WebDriver error: {0}")]
    WebDriver(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
