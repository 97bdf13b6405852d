//! Casekit Common Library
//!
//! The canonical in-memory model every script format converges to: a
//! [`TestCase`] holding an ordered sequence of [`Step`]s, plus the symbolic
//! key table used when replaying keyboard input.

pub mod keys;
pub mod types;

// Re-export commonly used types
pub use keys::Key;
pub use types::{Action, LocatorKind, Step, TestCase};

/// Casekit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default directory scanned for test scripts
pub fn default_testcases_dir() -> std::path::PathBuf {
    std::path::PathBuf::from("testcases")
}
