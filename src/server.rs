//! Web adapter: serves the dashboard page and exposes the callback registry
//! over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::dashboard::{DashLayout, Dashboard, RawViewState};
use crate::error::DashError;

const INDEX_HTML: &str = include_str!("web/index.html");

impl IntoResponse for DashError {
    fn into_response(self) -> Response {
        let status = match self {
            DashError::UnknownOutput { .. } => StatusCode::NOT_FOUND,
            DashError::UnknownSite { .. } | DashError::InvalidInterval { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn build_router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/layout", get(layout))
        .route("/api/callback/:output", post(callback))
        .with_state(dashboard)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn layout(State(dashboard): State<Arc<Dashboard>>) -> Json<DashLayout> {
    Json(dashboard.layout())
}

async fn callback(
    State(dashboard): State<Arc<Dashboard>>,
    Path(output): Path<String>,
    Json(raw): Json<RawViewState>,
) -> Result<Json<Value>, DashError> {
    match dashboard.invoke_raw(&output, &raw) {
        Ok(figure) => Ok(Json(figure.to_plotly())),
        Err(err) => {
            log::warn!("Rejected update for '{output}': {err}");
            Err(err)
        }
    }
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(dashboard: Arc<Dashboard>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    log::info!(
        "Dashboard running on http://{}",
        listener.local_addr().context("reading bound address")?
    );
    axum::serve(listener, build_router(dashboard))
        .await
        .context("serving dashboard")
}
