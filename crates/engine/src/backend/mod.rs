//! Backend capabilities the dispatcher drives
//!
//! The engine talks to the outside world through two narrow seams: the
//! [`UiDriver`]/[`Element`] traits for browser automation and the
//! [`HttpBackend`] trait for REST calls. Concrete adapters live alongside:
//! a W3C WebDriver wire-protocol client and a reqwest REST client. The
//! [`mock`] module provides in-memory doubles for exercising the dispatcher
//! and resolver without a browser or network.

pub mod http;
pub mod mock;
pub mod ui;
pub mod webdriver;

pub use http::{HttpBackend, HttpMethod, HttpResponse, RestClient};
pub use ui::{By, Element, UiDriver};
pub use webdriver::{WebDriverConfig, WebDriverSession};
