//! Plain HTTP endpoints.
//!
//! - `/`        : static landing page read from `gateway.index_path`
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::app_state::AppState;

pub async fn index(State(state): State<AppState>) -> Response {
    let path = &state.cfg().gateway.index_path;
    match tokio::fs::read_to_string(path).await {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "landing page unavailable");
            (StatusCode::NOT_FOUND, "landing page not found").into_response()
        }
    }
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
