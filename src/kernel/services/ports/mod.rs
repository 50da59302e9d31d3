//! Service ports: data contracts shared by the kernel and its adapters.

pub mod config;
pub mod settings;

pub use config::{ConfigError, SearchBoxDebounceOptions, DEFAULT_SEARCH_DELAY_MS};
pub use settings::{NavigatorSettings, SearchSettings, Settings};
