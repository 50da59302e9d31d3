use super::config::{ConfigError, SearchBoxDebounceOptions, DEFAULT_SEARCH_DELAY_MS};
use crate::kernel::exclude::ExcludeFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub navigator: NavigatorSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorSettings {
    /// Glob patterns, relative to the tree root, of nodes hidden from the
    /// navigator together with their subtrees.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSettings {
    #[serde(default = "default_delay", alias = "delayMs")]
    pub delay: u64,
    /// Expand ancestors of matched nodes after each settled query.
    #[serde(default = "default_true")]
    pub reveal_matches: bool,
    /// Drop unmatched rows from the printed view instead of dimming them.
    #[serde(default = "default_true")]
    pub hide_unmatched: bool,
    /// Search labels inside collapsed directories too.
    #[serde(default)]
    pub include_collapsed: bool,
}

fn default_delay() -> u64 {
    DEFAULT_SEARCH_DELAY_MS
}

fn default_true() -> bool {
    true
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            delay: default_delay(),
            reveal_matches: true,
            hide_unmatched: true,
            include_collapsed: false,
        }
    }
}

impl Settings {
    pub fn debounce_options(&self) -> Result<SearchBoxDebounceOptions, ConfigError> {
        SearchBoxDebounceOptions::with_delay_ms(self.search.delay)
    }

    pub fn exclude_filter(&self) -> Result<ExcludeFilter, ConfigError> {
        ExcludeFilter::new(&self.navigator.exclude)
    }
}
