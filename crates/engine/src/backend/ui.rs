//! UI backend capability traits

use async_trait::async_trait;

use crate::error::EngineResult;

/// Element-addressing strategy understood by a UI driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum By {
    Id,
    Name,
    Css,
    Xpath,
    TagName,
    ClassName,
}

impl By {
    pub fn as_str(&self) -> &'static str {
        match self {
            By::Id => "id",
            By::Name => "name",
            By::Css => "css",
            By::Xpath => "xpath",
            By::TagName => "tag",
            By::ClassName => "class",
        }
    }
}

impl std::fmt::Display for By {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to one located UI element.
#[async_trait]
pub trait Element: Send + Sync {
    async fn clear(&self) -> EngineResult<()>;
    async fn send_keys(&self, text: &str) -> EngineResult<()>;
    async fn click(&self) -> EngineResult<()>;
    async fn is_displayed(&self) -> EngineResult<bool>;
    async fn attribute(&self, name: &str) -> EngineResult<Option<String>>;
}

/// Browser-automation capability the dispatcher drives.
///
/// One driver instance owns one backend session; a run navigates once and
/// then locates and acts on elements step by step.
#[async_trait]
pub trait UiDriver: Send + Sync {
    async fn navigate(&self, url: &str) -> EngineResult<()>;
    async fn find(&self, by: By, value: &str) -> EngineResult<Box<dyn Element>>;
    async fn page_title(&self) -> EngineResult<String>;
    async fn page_source(&self) -> EngineResult<String>;
    async fn quit(&self) -> EngineResult<()>;
}
