use crate::kernel::services::ports::config::ConfigError;
use crate::kernel::services::ports::settings::Settings;
use std::fmt;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(serde_json::Error),
    Config(ConfigError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {e}"),
            SettingsError::Config(e) => write!(f, "invalid settings: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Config(e) => Some(e),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl From<ConfigError> for SettingsError {
    fn from(e: ConfigError) -> Self {
        SettingsError::Config(e)
    }
}

pub fn parse_settings(data: &str) -> Result<Settings, SettingsError> {
    let settings: Settings = serde_json::from_str(data)?;
    settings.debounce_options()?;
    settings.exclude_filter()?;
    Ok(settings)
}

/// Reads and validates a JSON settings file.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let data = std::fs::read_to_string(path)?;
    let settings = parse_settings(&data)?;
    tracing::info!(
        path = %path.display(),
        delay_ms = settings.search.delay,
        exclude = settings.navigator.exclude.len(),
        "settings loaded"
    );
    Ok(settings)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
