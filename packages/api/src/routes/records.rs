//! CRUD handlers shared by every [`Record`] collection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use store::Record;
use tracing::info;

use crate::auth::Admin;
use crate::error::{ApiError, Payload};
use crate::state::AppState;

pub async fn list<T: Record>(State(state): State<AppState>) -> Result<Json<Vec<T>>, ApiError> {
    Ok(Json(state.store.list::<T>().await?))
}

pub async fn get_one<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<T>, ApiError> {
    Ok(Json(state.store.get::<T>(&id).await?))
}

pub async fn create<T: Record>(
    _: Admin,
    State(state): State<AppState>,
    Payload(record): Payload<T>,
) -> Result<(StatusCode, Json<T>), ApiError> {
    let created = state.store.create(record).await?;
    info!(collection = T::COLLECTION, id = created.id(), "Created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<T: Record>(
    _: Admin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(record): Payload<T>,
) -> Result<Json<T>, ApiError> {
    let updated = state.store.update(&id, record).await?;
    info!(collection = T::COLLECTION, id = %id, "Updated");
    Ok(Json(updated))
}

pub async fn delete<T: Record>(
    _: Admin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete::<T>(&id).await?;
    info!(collection = T::COLLECTION, id = %id, "Deleted");
    Ok(StatusCode::NO_CONTENT)
}
