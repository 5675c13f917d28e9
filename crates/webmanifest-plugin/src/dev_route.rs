//! Dev server route
//!
//! `GET /{filename}` rebuilds the manifest in development mode on every
//! request, so edits to anything the transform reads show up on reload.
//! Conditional requests only save the body transfer, never the rebuild.

use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, EXPIRES, IF_NONE_MATCH, PRAGMA};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tracing::{debug, error};
use webmanifest_core::{ManifestBuilder, ManifestError, Mode, Payload};

pub const MANIFEST_CONTENT_TYPE: &str = "application/manifest+json; charset=utf-8";
pub const NO_CACHE: &str = "no-store, no-cache, must-revalidate, max-age=0";

#[derive(Clone)]
struct RouteState {
    builder: Arc<ManifestBuilder>,
}

/// Router serving the manifest at the configured route path
pub fn dev_router(builder: Arc<ManifestBuilder>) -> Router {
    let path = builder.options().route_path();
    debug!("Serving dev manifest at {}", path);
    Router::new()
        .route(&path, get(serve_manifest))
        .with_state(RouteState { builder })
}

async fn serve_manifest(State(state): State<RouteState>, headers: HeaderMap) -> Response {
    let builder = Arc::clone(&state.builder);
    // Building may shell out to git
    let built = tokio::task::spawn_blocking(move || dev_payload(&builder)).await;

    match built {
        Ok(Ok(payload)) => manifest_response(&payload, headers.get(IF_NONE_MATCH)),
        Ok(Err(e)) => {
            error!("Failed to build dev manifest: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            error!("Dev manifest task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn dev_payload(builder: &ManifestBuilder) -> Result<Payload, ManifestError> {
    let manifest = builder.build(Mode::Development)?;
    Payload::from_manifest(&manifest)
}

/// Response for a freshly built payload, honoring `If-None-Match`
pub fn manifest_response(payload: &Payload, if_none_match: Option<&HeaderValue>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(MANIFEST_CONTENT_TYPE));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    match HeaderValue::from_str(&payload.etag) {
        Ok(value) => {
            headers.insert(ETAG, value);
        }
        Err(e) => error!("Invalid ETag {:?}: {}", payload.etag, e),
    }

    let not_modified =
        if_none_match.is_some_and(|value| value.as_bytes() == payload.etag.as_bytes());
    if not_modified {
        return (StatusCode::NOT_MODIFIED, headers).into_response();
    }

    (StatusCode::OK, headers, payload.body.clone()).into_response()
}
