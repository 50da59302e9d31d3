use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_DIR_ENV: &str = "NAVIGATOR_LOG_DIR";

pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Logs to a daily file under `$NAVIGATOR_LOG_DIR` when set, stderr otherwise.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = std::env::var_os(LOG_DIR_ENV)
        .map(PathBuf::from)
        .and_then(|dir| std::fs::create_dir_all(&dir).ok().map(|_| dir));

    let (writer, guard) = match &log_dir {
        Some(dir) => {
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "navigator.log"))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("navigator=warn"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    if let Some(dir) = &log_dir {
        tracing::info!(log_dir = %dir.display(), "tracing initialized");
    }

    Some(LoggingGuard { _guard: guard })
}
