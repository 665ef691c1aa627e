//! GET and POST /api/request

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::{debug, error, info, warn};

use super::{ApiError, ApiResponse, AppState};
use crate::db::request_repo::{self, RequestValues};
use crate::db::{Database, DatabaseError};
use crate::model::{RequestAction, RequestPayload, RequestRow};

pub async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RequestRow>>>, ApiError> {
    let fail = |e: DatabaseError| {
        error!(error = %e, "Request list query failed");
        ApiError::Fetch("Failed to fetch requests".to_string())
    };

    let db = state.db.get().await.map_err(fail)?;
    let rows = db.run(request_repo::list_all).await.map_err(fail)?;
    Ok(Json(ApiResponse::ok(rows)))
}

/// Validates a submission and applies it.
///
/// `save` inserts, `update` overwrites the details and all three
/// references of an existing row. `print`, a missing action and an
/// unrecognized one are acknowledged without a write once details pass.
pub async fn submit_request(
    State(state): State<AppState>,
    body: Result<Json<RequestPayload>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(payload) = body.map_err(|rejection| {
        debug!(error = %rejection, "Rejected request body");
        ApiError::BadRequest("Invalid request body".to_string())
    })?;

    let details = match payload.details.as_deref().map(str::trim) {
        Some(details) if !details.is_empty() => details.to_string(),
        _ => return Err(ApiError::BadRequest("Request details is required".to_string())),
    };

    let values = RequestValues {
        details,
        branch_id: payload.branch_id,
        dept_id: payload.department_id,
        mis_id: payload.mis_id,
    };

    match payload.action {
        Some(RequestAction::Save) => {
            let id = write(&state, move |db| request_repo::insert(db, &values)).await?;
            info!(id, "Request saved");
        }
        Some(RequestAction::Update) => {
            let id = payload
                .id
                .ok_or_else(|| ApiError::BadRequest("ID is required for update".to_string()))?;
            let changed = write(&state, move |db| request_repo::update(db, id, &values)).await?;
            if changed == 0 {
                warn!(id, "Update matched no request");
            } else {
                info!(id, "Request updated");
            }
        }
        Some(RequestAction::Print) | None => {
            debug!(action = ?payload.action, "Request acknowledged without a write");
        }
    }

    Ok(Json(ApiResponse::done()))
}

async fn write<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> Result<T, DatabaseError> + Send + 'static,
    T: Send + 'static,
{
    let fail = |e: DatabaseError| {
        error!(error = %e, "Request write failed");
        ApiError::Database {
            message: e.to_string(),
        }
    };

    let db = state.db.get().await.map_err(fail)?;
    db.run(f).await.map_err(fail)
}
