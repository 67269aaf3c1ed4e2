use axum::{extract::State, Json};
use serde_json::{json, Value};
use store::MigrationReport;

use crate::auth::Admin;
use crate::error::ApiError;
use crate::state::AppState;

/// Which backend is serving requests right now.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let source = state.store.status().await;
    Json(json!({ "backend": source }))
}

pub async fn migrate(
    _: Admin,
    State(state): State<AppState>,
) -> Result<Json<MigrationReport>, ApiError> {
    Ok(Json(state.store.migrate().await?))
}
