//! Request handlers.

use crate::app::AppState;
use crate::error::{ServeError, ServeResult};
use crate::mime;
use crate::render::AppView;
use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tokio_util::io::ReaderStream;

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub app: Option<String>,
}

/// `GET /` lists the catalog; `GET /?app=<file>` shows one bundle.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> ServeResult<Html<String>> {
    match query.app {
        Some(file_name) => detail(&state, file_name).await,
        None => {
            let apps = scan(&state).await?;
            tracing::debug!(count = apps.len(), "rendering catalog listing");
            Ok(Html(state.templates.render_list(&apps)?))
        }
    }
}

async fn detail(state: &AppState, file_name: String) -> ServeResult<Html<String>> {
    let catalog = state.catalog.clone();
    let lookup = file_name.clone();
    let summary = tokio::task::spawn_blocking(move || catalog.find(&lookup)).await??;

    let Some(summary) = summary else {
        return Err(ServeError::NotFound(file_name));
    };
    Ok(Html(state.templates.render_detail(&AppView::from(&summary))?))
}

/// `GET /api/apps`
pub async fn list_json(State(state): State<AppState>) -> ServeResult<Json<Vec<AppView>>> {
    Ok(Json(scan(&state).await?))
}

/// `GET /manifest`
pub async fn manifest() -> ServeError {
    ServeError::NotImplemented("manifest generation")
}

/// `GET /<file>` streams an asset from the catalog directory.
pub async fn asset(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> ServeResult<Response> {
    let Some(path) = state.catalog.asset_path(&file_name) else {
        return Err(ServeError::NotFound(file_name));
    };
    let Some(content_type) = mime::content_type(&file_name) else {
        return Err(ServeError::UnsupportedMediaType(
            mime::extension(&file_name).to_string(),
        ));
    };

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ServeError::NotFound(file_name));
        }
        Err(e) => return Err(e.into()),
    };
    let metadata = file.metadata().await?;
    if !metadata.is_file() {
        return Err(ServeError::NotFound(file_name));
    }

    tracing::debug!(file = %file_name, bytes = metadata.len(), "streaming asset");
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_LENGTH, metadata.len().to_string()),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}

/// Anything no route matches.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, format!("Not found: {}", uri.path()))
}

async fn scan(state: &AppState) -> ServeResult<Vec<AppView>> {
    let catalog = state.catalog.clone();
    let summaries = tokio::task::spawn_blocking(move || catalog.scan()).await??;
    Ok(summaries.iter().map(AppView::from).collect())
}
