//! HTTP surface of the request store.
//!
//! Routes are thin pass-throughs to the repositories; the database handle
//! is opened lazily by the first request that needs it.

mod health;
mod lookups;
mod requests;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;

use crate::db::SharedDatabase;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<SharedDatabase>,
}

impl AppState {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db: Arc::new(db) }
    }
}

/// Builds the request store router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/version", get(health::version))
        .nest("/api", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/branch", get(lookups::list_branches))
        .route("/department", get(lookups::list_departments))
        .route("/misName", get(lookups::list_mis_names))
        .route(
            "/request",
            get(requests::list_requests).post(requests::submit_request),
        )
}

/// Success envelope used by the list endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    /// `{"success": true}` with no payload.
    pub fn done() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }
}

/// Failures a handler reports to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A list endpoint could not read its table.
    #[error("{0}")]
    Fetch(String),

    /// The submitted body was rejected before touching the database.
    #[error("{0}")]
    BadRequest(String),

    /// A write failed; `message` carries the underlying cause.
    #[error("Database error: {message}")]
    Database { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Fetch(_) | ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Fetch(message) => serde_json::json!({
                "success": false,
                "message": message,
            }),
            ApiError::BadRequest(error) => serde_json::json!({ "error": error }),
            ApiError::Database { message } => serde_json::json!({
                "error": "Database error",
                "message": message,
            }),
        };
        (status, Json(body)).into_response()
    }
}
