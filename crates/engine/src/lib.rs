//! Casekit Engine
//!
//! This crate provides the core of the Casekit toolkit:
//! - Parses multi-dialect text scripts into the canonical step model
//! - Serializes the model back to legacy or narrative text
//! - Resolves symbolic locators through an ordered strategy fallback
//! - Dispatches step execution to a UI or REST backend
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Casekit Engine (Rust)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  parser                                                     │
//! │    ├── legacy dialect: ordered rule chain, first match wins │
//! │    └── narrative dialect: Given/When/Then/And sub-parser    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  runner::TestRunner                                         │
//! │    ├── classify(case) -> Ui | Rest                          │
//! │    ├── Ui path: per-step catch-and-continue                 │
//! │    └── Rest path: hard stop on ASSERT_BODY mismatch         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  locator::LocatorResolver                                   │
//! │    alt= -> title wait -> id / name / css / xpath / class    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  backend                                                    │
//! │    ├── UiDriver / Element traits (WebDriver wire adapter)   │
//! │    └── HttpBackend trait (reqwest adapter)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod backend;
pub mod discovery;
pub mod error;
pub mod locator;
pub mod markdown;
pub mod parser;
pub mod runner;
pub mod serializer;

pub use error::{EngineError, EngineResult};
pub use parser::{load_script, parse_str, ScriptFormat};
pub use runner::{RunMode, RunReport, StepOutcome, TestRunner};
pub use serializer::SerializeMode;
