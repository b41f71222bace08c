// xt-entropy/src/logger.rs
//! Logging setup for the `xt-entropy` binary and its tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger` once per process.
///
/// With `Some(level)` the level overrides `RUST_LOG`; with `None` the
/// environment decides and logging stays off when it is unset. Host messages
/// are printed separately, so the default does not echo them twice.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("off"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp_millis();
    // A second initialization (e.g. across tests) is not an error.
    let _ = builder.try_init();
}
