//! HTTP catalog of `.ipa` application bundles
//!
//! Routes:
//! - `GET /` lists every readable bundle in the catalog directory
//! - `GET /?app=<file>` shows one bundle
//! - `GET /api/apps` returns the listing as JSON
//! - `GET /manifest` answers `501 Not Implemented`
//! - `GET /<file>` streams an icon or bundle from the catalog directory

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod mime;
pub mod render;
pub mod shutdown;

pub use app::{AppState, Limits, router};
pub use cli::Cli;
pub use error::{ServeError, ServeResult};
pub use render::{AppView, Templates};
pub use shutdown::ShutdownHandle;
