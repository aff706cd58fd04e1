use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

/// Variable holding the tracing filter directive.
pub const LOG_ENV: &str = "READABLE_LOG";

/// Filter used when [`LOG_ENV`] is unset. The HTML parser's own log lines
/// stay hidden unless they are errors.
pub const DEFAULT_FILTER: &str = "warn,html5ever=error";

/// Installs the stderr tracing subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
