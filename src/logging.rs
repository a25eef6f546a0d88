//! Structured logging bootstrap using `tracing`.
//!
//! Events go to stderr: `clean` prints the cleaned motion on stdout and
//! callers pipe it straight into a summariser.

use std::io::{stderr, IsTerminal};

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset. HTTP client internals stay quiet.
const DEFAULT_DIRECTIVES: &str = "info,hyper=warn,reqwest=warn";

/// Install the global subscriber once; later calls are no-ops.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVES))?;

    let fmt_layer = fmt::layer()
        .with_writer(stderr)
        .with_ansi(stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(fmt_layer).init();
    tracing::debug!(filter = DEFAULT_DIRECTIVES, "tracing initialised");
    Ok(())
}
