//! Log subscriber setup.
//!
//! Cleanup stacks emit `tracing` events under the `scopestack` target. Binaries
//! and tests that want to see them install a subscriber with [`init`] or
//! [`init_for_tests`].

use scopestack_core::{DEFAULT_LOG_FILTER, RUST_LOG_VAR, SCOPESTACK_LOG_VAR};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, trace, warn, Level};

/// Build the filter from `SCOPESTACK_LOG`, then `RUST_LOG`, then the default.
pub fn env_filter() -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_env(SCOPESTACK_LOG_VAR)
        .or_else(|_| EnvFilter::try_from_env(RUST_LOG_VAR))
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;
    Ok(filter)
}

/// Initialize the tracing system
///
/// Writes compact events to stderr, with colour only when stderr is a
/// terminal. Fails if a global subscriber is already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter()?)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Install a subscriber that writes through the test harness capture.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_for_tests() {
    let filter = env_filter().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}
