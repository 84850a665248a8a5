//! Static file handler for `/cdn/*`

use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use axum::{
    body::Body,
    extract::{Path as UrlPath, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::Response,
};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use crate::{
    conditional::{etag_for, http_date, is_not_modified},
    content_type,
    error::ApiError,
    state::AppState,
};

/// Resolve a request path below `root`
///
/// Only plain name segments are accepted; `..`, `.`, absolute paths and
/// drive prefixes all yield `None`.
#[must_use]
pub fn resolve_path(root: &Path, requested: &str) -> Option<PathBuf> {
    let relative = Path::new(requested);
    let mut segments = 0_usize;
    for component in relative.components() {
        match component {
            Component::Normal(_) => segments += 1,
            _ => return None,
        }
    }
    if segments == 0 || requested.contains('\\') {
        return None;
    }
    Some(root.join(relative))
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|e| ApiError::Internal(e.to_string()))
}

/// Serve a file with `ETag`/`Last-Modified`, answering 304 when validators match
#[instrument(skip(state, headers))]
pub async fn serve_file(
    State(state): State<AppState>,
    UrlPath(requested): UrlPath<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let not_found = || ApiError::NotFound(format!("cdn/{requested}"));

    let path = resolve_path(&state.root, &requested).ok_or_else(|| {
        debug!("Rejected path outside the CDN root");
        not_found()
    })?;

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return Err(not_found()),
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(ApiError::Internal(e.to_string())),
    };
    let content = tokio::fs::read(&path)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let etag = etag_for(&content);
    let last_modified: Option<DateTime<Utc>> = metadata.modified().ok().map(DateTime::from);

    let not_modified = is_not_modified(&headers, &etag, last_modified);
    let mut builder = Response::builder()
        .header(header::ETAG, header_value(&etag)?)
        .header(header::CACHE_CONTROL, header_value(&state.cache_control())?);
    if let Some(modified) = last_modified {
        builder = builder.header(header::LAST_MODIFIED, header_value(&http_date(modified))?);
    }

    let response = if not_modified {
        debug!(%etag, "Not modified");
        builder.status(StatusCode::NOT_MODIFIED).body(Body::empty())
    } else {
        debug!(%etag, bytes = content.len(), "Serving file");
        builder
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type::for_path(&path))
            .body(Body::from(content))
    };
    response.map_err(|e| ApiError::Internal(e.to_string()))
}
