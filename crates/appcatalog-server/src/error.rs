//! Request errors and their HTTP status mapping.

use appcatalog_bundle::BundleError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised while answering a request.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Requested asset or bundle is not in the catalog
    #[error("Not found: {0}")]
    NotFound(String),

    /// Requested asset has an extension outside the served table
    #[error("File format {0} is not supported by this server")]
    UnsupportedMediaType(String),

    /// Route exists but has no implementation
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// Catalog directory or bundle fault
    #[error("Catalog error: {0}")]
    Catalog(#[from] BundleError),

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// File system fault while serving an asset
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Blocking catalog work panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServeError {
    /// HTTP status answered for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::NotFound(_) => StatusCode::NOT_FOUND,
            ServeError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ServeError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            ServeError::Catalog(_)
            | ServeError::Render(_)
            | ServeError::Io(_)
            | ServeError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}

/// Result type for request handlers.
pub type ServeResult<T> = Result<T, ServeError>;
