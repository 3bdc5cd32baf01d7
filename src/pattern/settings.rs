// Mon Jan 19 2026 - Alex

use serde::{Deserialize, Serialize};

/// Knobs for the signature parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSettings {
    /// Character standing in for an unknown nibble or byte. Defaults to `?`.
    pub wildcard: u8,
}

impl PatternSettings {
    pub fn new() -> Self {
        Self { wildcard: b'?' }
    }

    pub fn with_wildcard(mut self, wildcard: u8) -> Self {
        self.wildcard = wildcard;
        self
    }
}

impl Default for PatternSettings {
    fn default() -> Self {
        Self::new()
    }
}
