use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_SEARCH_DELAY_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NonPositiveDelay,
    InvalidExcludePattern { pattern: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveDelay => {
                write!(f, "search box delay must be a positive number of milliseconds")
            }
            ConfigError::InvalidExcludePattern { pattern, reason } => {
                write!(f, "invalid exclude pattern {pattern:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBoxDebounceOptions {
    #[serde(alias = "delay")]
    pub delay_ms: u64,
}

impl SearchBoxDebounceOptions {
    pub const DEFAULT: Self = Self {
        delay_ms: DEFAULT_SEARCH_DELAY_MS,
    };

    pub fn with_delay_ms(delay_ms: u64) -> Result<Self, ConfigError> {
        let options = Self { delay_ms };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delay_ms == 0 {
            return Err(ConfigError::NonPositiveDelay);
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for SearchBoxDebounceOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
