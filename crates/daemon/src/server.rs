// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP surface: routing, handlers, auth middleware

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use fx_core::{FocusTarget, GateError, GateOutcome, IdGen, RequestGate, StatusClient};
use serde_json::json;

/// Header carrying the shared secret when one is configured
pub const AUTH_HEADER: &str = "x-auth-token";

/// State shared across handlers
pub struct AppState<C, G: IdGen> {
    pub gate: RequestGate<C, G>,
}

impl<C, G: IdGen> Clone for AppState<C, G> {
    fn clone(&self) -> Self {
        Self {
            gate: self.gate.clone(),
        }
    }
}

/// Build the daemon router.
///
/// `auth_token = None` means open access; the health endpoint is always
/// open so probes keep working behind a secret.
pub fn router<C, G>(state: AppState<C, G>, auth_token: Option<String>) -> Router
where
    C: StatusClient + Send + Sync + 'static,
    G: IdGen + 'static,
{
    let status = Router::new()
        .route("/status/:target", post(set_status::<C, G>))
        .layer(middleware::from_fn_with_state(auth_token, require_auth))
        .with_state(state);

    Router::new().route("/health", get(health)).merge(status)
}

#[allow(clippy::unused_async)]
async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// The data path: validate the target, then let the gate decide between
/// inline execution and deferred acceptance.
async fn set_status<C: StatusClient, G: IdGen>(
    State(state): State<AppState<C, G>>,
    Path(target): Path<String>,
) -> Result<Response, AppError> {
    let target: FocusTarget = target
        .parse()
        .map_err(|e: fx_core::UnknownTarget| AppError::InvalidTarget(e.to_string()))?;

    match state.gate.submit(target).await? {
        GateOutcome::Executed => Ok((
            StatusCode::OK,
            Json(json!({ "status": "ok", "target": target })),
        )
            .into_response()),
        GateOutcome::Queued { id } => Ok((
            StatusCode::ACCEPTED,
            Json(json!({ "status": "queued", "id": id })),
        )
            .into_response()),
    }
}

async fn require_auth(
    State(token): State<Option<String>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(expected) = token {
        let provided = request
            .headers()
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            return Err(AppError::Unauthorized);
        }
    }
    Ok(next.run(request).await)
}

/// Handler errors mapped onto HTTP statuses
#[derive(Debug)]
pub enum AppError {
    /// Unknown target; rejected before any lock or queue interaction
    InvalidTarget(String),
    /// Shared secret missing or wrong
    Unauthorized,
    /// Durable store unavailable
    Store(String),
    /// Upstream call refused or unreachable on the inline path
    Upstream(String),
}

impl From<GateError> for AppError {
    fn from(e: GateError) -> Self {
        match e {
            GateError::Store(e) => AppError::Store(e.to_string()),
            GateError::Status(e) => AppError::Upstream(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidTarget(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "invalid auth token".to_string()),
            AppError::Store(message) => {
                tracing::error!(%message, "store failure on request path");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            AppError::Upstream(message) => {
                tracing::error!(%message, "inline upstream call failed");
                (StatusCode::BAD_GATEWAY, message)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
