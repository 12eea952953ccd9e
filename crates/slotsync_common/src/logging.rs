// --- File: crates/slotsync_common/src/logging.rs ---
//! Logging setup shared by the Slotsync binaries and tests.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO level.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific minimum level.
///
/// `RUST_LOG` still takes precedence through the env filter; the level only
/// sets the default. Safe to call more than once, later calls are no-ops.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
