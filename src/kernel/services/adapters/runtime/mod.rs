//! Async runtime adapter: arms debounce timers and reports back to the event loop.

mod async_runtime;
mod message;

pub use async_runtime::{SearchRuntime, TimerHandle};
pub use message::{NavigatorMessage, SearchBoxId};
