use std::fmt;

use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};

const SUFFIX_LEN: usize = 8;

/// Unique channel identifier: `{prefix}_{timestamp_ms}_{random_suffix}`
///
/// Uniqueness is practically guaranteed within one process run (millisecond
/// timestamp plus 8 random alphanumeric characters), not cryptographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(String);

impl ChannelId {
    /// Generate a fresh identifier for the given prefix. Infallible.
    pub fn generate(prefix: &str) -> Self {
        let timestamp = Utc::now().timestamp_millis();
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SUFFIX_LEN)
            .map(char::from)
            .collect();

        Self(format!("{prefix}_{timestamp}_{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ChannelId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ChannelId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
