//! Global subscriber installation

use crate::reload::{ReloadHandle, level_filter};
use appcatalog_core::LogLevel;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload;

/// Initialize the logging system
///
/// Installs a registry with a reloadable level filter and a `fmt` layer
/// writing to stderr. Returns `false` when a global subscriber was already
/// set, in which case the existing one is left untouched.
pub fn init_logging(level: LogLevel) -> bool {
    let (filter, handle) = reload::Layer::new(level_filter(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr));

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return false;
    }

    ReloadHandle::global().set_handle(handle);
    tracing::debug!(level = %level, "logging initialized");
    true
}
