//! appcatalog-logging - Tracing setup for the catalog service
//!
//! This crate provides:
//! - [`init_logging`] to install the global subscriber once
//! - [`ReloadHandle`] to change the log level while the service runs

mod reload;
mod subscriber;

pub use appcatalog_core::LogLevel;
pub use reload::ReloadHandle;
pub use subscriber::init_logging;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_logging};
}
