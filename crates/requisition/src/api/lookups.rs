//! GET /api/branch, /api/department, /api/misName

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::{ApiError, ApiResponse, AppState};
use crate::db::lookup_repo;
use crate::model::LookupKind;

pub async fn list_branches(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    list(&state, LookupKind::Branch).await
}

pub async fn list_departments(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    list(&state, LookupKind::Department).await
}

pub async fn list_mis_names(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    list(&state, LookupKind::MisName).await
}

async fn list(state: &AppState, kind: LookupKind) -> Result<Json<Value>, ApiError> {
    let fail = |e: &dyn std::fmt::Display| {
        tracing::error!(lookup = %kind, error = %e, "Lookup query failed");
        ApiError::Fetch(kind.failure_message().to_string())
    };

    let db = state.db.get().await.map_err(|e| fail(&e))?;
    let entries = db
        .run(move |db| lookup_repo::list(db, kind))
        .await
        .map_err(|e| fail(&e))?;

    let keyed: Vec<_> = entries.iter().map(|entry| entry.keyed(kind)).collect();
    let body = serde_json::to_value(ApiResponse::ok(keyed)).map_err(|e| fail(&e))?;
    Ok(Json(body))
}
