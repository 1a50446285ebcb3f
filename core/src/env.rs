//! Environment variable lookup.
//!
//! Default resolution reads environment variables through [`Environment`] so
//! callers can substitute a fixed set of variables instead of the process
//! environment.

use std::collections::HashMap;

/// Source of environment variables.
pub trait Environment: Send + Sync {
    /// Returns the value of `key`, or `None` if it is not set.
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the current process.
///
/// Variables whose value is not valid Unicode are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
