//! Core types for Casekit
//!
//! Every supported script dialect parses into the same canonical model:
//! a [`TestCase`] carrying metadata and an ordered list of [`Step`]s.

use serde::{Deserialize, Serialize};

/// Placeholder feature name when a legacy script carries no `Feature:` line
pub const DEFAULT_FEATURE_NAME: &str = "Auto-parsed test case";

/// Placeholder feature name for narrative scripts without a `Feature:` line
pub const GHERKIN_FEATURE_NAME: &str = "Gherkin Feature";

/// Sentinel target URL for API test cases (navigation is step-driven)
pub const API_TEST_SENTINEL: &str = "API_TEST";

/// Sentinel target URL for narrative-built test cases
pub const GHERKIN_SENTINEL: &str = "GHERKIN";

/// A step's action verb, normalized to a fixed vocabulary.
///
/// Unrecognized verbs are preserved verbatim in [`Action::Unknown`] so the
/// execution layer can report them instead of the parser losing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    Type,
    Click,
    Keypress,
    Select,
    Assert,
    Get,
    Post,
    Put,
    Delete,
    AssertBody,
    Gherkin,
    Unknown(String),
}

impl Action {
    /// Parse a verb case-insensitively. Never fails: unmatched input is
    /// preserved in [`Action::Unknown`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "type" => Action::Type,
            "click" => Action::Click,
            "keypress" => Action::Keypress,
            "select" => Action::Select,
            "assert" => Action::Assert,
            "get" => Action::Get,
            "post" => Action::Post,
            "put" => Action::Put,
            "delete" => Action::Delete,
            "assert_body" => Action::AssertBody,
            "gherkin" => Action::Gherkin,
            _ => Action::Unknown(raw.trim().to_string()),
        }
    }

    /// Canonical text form: UI verbs lowercase, HTTP verbs uppercase.
    pub fn as_str(&self) -> &str {
        match self {
            Action::Type => "type",
            Action::Click => "click",
            Action::Keypress => "keypress",
            Action::Select => "select",
            Action::Assert => "assert",
            Action::Get => "GET",
            Action::Post => "POST",
            Action::Put => "PUT",
            Action::Delete => "DELETE",
            Action::AssertBody => "ASSERT_BODY",
            Action::Gherkin => "GHERKIN",
            Action::Unknown(raw) => raw,
        }
    }

    /// True for actions that route a test case to the REST path.
    pub fn is_http(&self) -> bool {
        matches!(
            self,
            Action::Get | Action::Post | Action::Put | Action::Delete | Action::AssertBody
        )
    }
}

impl From<String> for Action {
    fn from(s: String) -> Self {
        Action::parse(&s)
    }
}

impl From<Action> for String {
    fn from(a: Action) -> Self {
        a.as_str().to_string()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of how a step's `property` field is interpreted.
///
/// UI steps carry an element-addressing kind; narrative steps carry the
/// Gherkin keyword they originated from; HTTP steps carry [`LocatorKind::None`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocatorKind {
    Id,
    Name,
    Css,
    Xpath,
    Tag,
    Alt,
    Title,
    ClassName,
    Given,
    When,
    Then,
    And,
    Text,
    None,
    /// Unrecognized kind, preserved verbatim for round-tripping.
    Other(String),
}

impl LocatorKind {
    /// Parse a kind case-insensitively. Empty input is [`LocatorKind::None`];
    /// unmatched input is preserved in [`LocatorKind::Other`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return LocatorKind::None;
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "id" => LocatorKind::Id,
            "name" => LocatorKind::Name,
            "css" => LocatorKind::Css,
            "xpath" => LocatorKind::Xpath,
            "tag" => LocatorKind::Tag,
            "alt" => LocatorKind::Alt,
            "title" => LocatorKind::Title,
            "class" | "classname" | "class name" => LocatorKind::ClassName,
            "given" => LocatorKind::Given,
            "when" => LocatorKind::When,
            "then" => LocatorKind::Then,
            "and" => LocatorKind::And,
            "text" => LocatorKind::Text,
            _ => LocatorKind::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LocatorKind::Id => "id",
            LocatorKind::Name => "name",
            LocatorKind::Css => "css",
            LocatorKind::Xpath => "xpath",
            LocatorKind::Tag => "tag",
            LocatorKind::Alt => "alt",
            LocatorKind::Title => "title",
            LocatorKind::ClassName => "class",
            LocatorKind::Given => "Given",
            LocatorKind::When => "When",
            LocatorKind::Then => "Then",
            LocatorKind::And => "And",
            LocatorKind::Text => "text",
            LocatorKind::None => "",
            LocatorKind::Other(raw) => raw,
        }
    }
}

impl Default for LocatorKind {
    fn default() -> Self {
        LocatorKind::None
    }
}

impl From<String> for LocatorKind {
    fn from(s: String) -> Self {
        LocatorKind::parse(&s)
    }
}

impl From<LocatorKind> for String {
    fn from(k: LocatorKind) -> Self {
        k.as_str().to_string()
    }
}

impl std::fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One atomic test action.
///
/// `property` is the locator string for UI steps, the endpoint URL for HTTP
/// steps, or a free-text description for narrative steps. `value` is input
/// text, a key name, a request body, or expected-assertion text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub action: Action,
    #[serde(default)]
    pub locator_kind: LocatorKind,
    #[serde(default)]
    pub property: String,
    #[serde(default)]
    pub value: String,
}

impl Step {
    pub fn new(
        action: Action,
        locator_kind: LocatorKind,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            action,
            locator_kind,
            property: property.into(),
            value: value.into(),
        }
    }

    /// A UI step addressing an element.
    pub fn ui(
        action: Action,
        locator_kind: LocatorKind,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(action, locator_kind, property, value)
    }

    /// An HTTP step: the endpoint goes in `property`, the body in `value`.
    pub fn http(method: Action, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(method, LocatorKind::None, url, body)
    }

    /// A response-body assertion step for the REST path.
    pub fn assert_body(expected: impl Into<String>) -> Self {
        Self::new(Action::AssertBody, LocatorKind::None, "", expected)
    }
}

/// An ordered aggregate of steps plus script-level metadata.
///
/// Constructed once by the parser (or the CLI builder) and treated as
/// immutable by the serializer and the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub feature_name: String,
    pub target_url: String,
    #[serde(default)]
    pub event_listener: String,
    pub steps: Vec<Step>,
}

impl TestCase {
    pub fn new(feature_name: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            feature_name: feature_name.into(),
            target_url: target_url.into(),
            event_listener: String::new(),
            steps: Vec::new(),
        }
    }

    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_event_listener(mut self, listener: impl Into<String>) -> Self {
        self.event_listener = listener.into();
        self
    }

    /// True when any step carries an HTTP verb or `ASSERT_BODY`: the whole
    /// case is then executed on the REST path.
    pub fn is_api(&self) -> bool {
        self.steps.iter().any(|s| s.action.is_http())
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for TestCase {
    fn default() -> Self {
        Self {
            feature_name: DEFAULT_FEATURE_NAME.to_string(),
            target_url: String::new(),
            event_listener: String::new(),
            steps: Vec::new(),
        }
    }
}
