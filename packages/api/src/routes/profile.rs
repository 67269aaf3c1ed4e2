use axum::{extract::State, Json};
use store::Profile;
use tracing::info;

use crate::auth::Admin;
use crate::error::{ApiError, Payload};
use crate::state::AppState;

pub async fn get_profile(State(state): State<AppState>) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.store.load_singleton::<Profile>().await?))
}

pub async fn put_profile(
    _: Admin,
    State(state): State<AppState>,
    Payload(profile): Payload<Profile>,
) -> Result<Json<Profile>, ApiError> {
    let saved = state.store.save_singleton(profile).await?;
    info!("Profile updated");
    Ok(Json(saved))
}
