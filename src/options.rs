use serde::Deserialize;

pub const DEFAULT_TIMEOUT: u32 = 3000;

/// Checker configuration, deserializable from a JS options object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerOptions {
    /// Upper bound in milliseconds for a single active probe.
    pub timeout: u32,
}

impl CheckerOptions {
    pub fn with_timeout(timeout: u32) -> Self {
        Self { timeout }
    }
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
