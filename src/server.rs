//! Local HTTP front-end.
//!
//! Adapts plain HTTP requests into invocation events so the handler can be
//! run and exercised without Lambda. Every method is forwarded; the
//! dispatcher decides what is supported.

use anyhow::{Context, Result};
use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::{Method, header},
    response::{IntoResponse, Response},
    routing::any,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::dispatch::dispatch;
use crate::models::{HandlerRequest, HandlerResponse};
use crate::routes;
use crate::state::AppState;

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(routes::ITEMS, any(collection_handler))
        .route(routes::ITEM, any(item_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.service_host, state.config.service_port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

async fn collection_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> HandlerResponse {
    forward(&state, method, None, body).await
}

async fn item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    method: Method,
    body: Bytes,
) -> HandlerResponse {
    forward(&state, method, Some(id), body).await
}

async fn forward(state: &AppState, method: Method, id: Option<String>, body: Bytes) -> HandlerResponse {
    let mut request = HandlerRequest::new(method.as_str());
    if let Some(id) = id {
        request = request.with_id(id);
    }
    if !body.is_empty() {
        request = match String::from_utf8(body.to_vec()) {
            Ok(text) => request.with_body(text),
            Err(_) => {
                let mut request = request.with_body(BASE64.encode(&body));
                request.is_base64_encoded = true;
                request
            }
        };
    }

    let request_id = Uuid::new_v4();
    dispatch(state, request)
        .instrument(tracing::info_span!("request", %request_id))
        .await
}
