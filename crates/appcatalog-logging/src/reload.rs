//! Runtime log level changes

use appcatalog_core::LogLevel;
use once_cell::sync::OnceCell;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::reload;

type FilterHandle = reload::Handle<LevelFilter, Registry>;

/// Controls the level filter of the installed subscriber.
///
/// The filter handle is registered once, by [`init_logging`](crate::init_logging).
pub struct ReloadHandle {
    filter: OnceCell<FilterHandle>,
}

impl ReloadHandle {
    pub const fn new() -> Self {
        Self {
            filter: OnceCell::new(),
        }
    }

    /// The handle bound to the global subscriber.
    pub fn global() -> &'static ReloadHandle {
        static GLOBAL: ReloadHandle = ReloadHandle::new();
        &GLOBAL
    }

    /// Register the subscriber's filter handle. Returns `false` if one was
    /// already registered.
    pub fn set_handle(&self, handle: FilterHandle) -> bool {
        self.filter.set(handle).is_ok()
    }

    pub fn is_initialized(&self) -> bool {
        self.filter.get().is_some()
    }

    /// Switch the subscriber to `level`.
    pub fn reload_level(&self, level: LogLevel) -> Result<(), String> {
        let filter = self
            .filter
            .get()
            .ok_or_else(|| "Reload handle not initialized".to_string())?;
        filter
            .modify(|current| *current = level_filter(level))
            .map_err(|e| format!("Failed to reload filter: {e}"))?;
        tracing::debug!(level = %level, "log level applied");
        Ok(())
    }

    /// Level filter currently in effect.
    pub fn current_filter(&self) -> Option<LevelFilter> {
        self.filter.get()?.clone_current()
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}
