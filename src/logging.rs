//! Diagnostic logging
//!
//! Progress lines meant for the user go through [`crate::ui::say`]; this is
//! only for diagnostics, written to stderr.

use tracing_subscriber::EnvFilter;

/// Variable holding an `EnvFilter` directive string
pub const LOG_ENV: &str = "MSGBUILD_LOG";

/// Default level when `MSGBUILD_LOG` is not set
pub fn default_level(verbose: bool, debug: bool) -> tracing::Level {
    if debug {
        tracing::Level::TRACE
    } else if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    }
}

/// Initialize logging for the CLI (stderr only)
pub fn init(verbose: bool, debug: bool) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose, debug).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
