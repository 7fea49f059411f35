//! Router assembly and shared request state.

use crate::handlers;
use crate::render::Templates;
use appcatalog_bundle::Catalog;
use appcatalog_core::CatalogConfig;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// State shared by every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub catalog: Catalog,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(catalog: Catalog, templates: Templates) -> Self {
        Self {
            catalog,
            templates: Arc::new(templates),
        }
    }
}

/// Per-request limits applied at the router boundary.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_concurrent_requests: usize,
    pub request_timeout: Duration,
}

impl From<&CatalogConfig> for Limits {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            max_concurrent_requests: config.max_concurrent_requests,
            request_timeout: Duration::from_millis(config.request_timeout_ms),
        }
    }
}

/// Catalog routes with tracing, timeout and concurrency limit layers.
///
/// The concurrency limit is one semaphore shared by every route.
pub fn router(state: AppState, limits: Limits) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/apps", get(handlers::list_json))
        .route("/manifest", get(handlers::manifest))
        .route("/:file", get(handlers::asset))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(limits.request_timeout))
                .layer(GlobalConcurrencyLimitLayer::new(limits.max_concurrent_requests)),
        )
        .with_state(state)
}
