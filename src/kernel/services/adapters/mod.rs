//! Service adapters: runtime and IO specific implementations.

pub mod runtime;
pub mod settings;

pub use runtime::{NavigatorMessage, SearchBoxId, SearchRuntime, TimerHandle};
pub use settings::{load_settings, parse_settings, SettingsError};
