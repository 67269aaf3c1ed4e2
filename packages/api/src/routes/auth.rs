use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{is_authenticated, removal_cookie, session_cookie, verify_admin_password};
use crate::error::{ApiError, Payload};
use crate::settings::Auth;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthStatus {
    pub authenticated: bool,
}

/// Check the password; on success the response carries the admin cookie.
pub fn check_login(auth: &Auth, password: &str) -> Result<String, ApiError> {
    if !auth.is_configured() {
        warn!("Login attempted but auth.password / auth.token are not configured");
        return Err(ApiError::Unauthorized);
    }
    if !verify_admin_password(password, &auth.password) {
        warn!("Rejected admin login");
        return Err(ApiError::Unauthorized);
    }
    info!("Admin logged in");
    Ok(session_cookie(auth).to_string())
}

pub async fn login(
    State(state): State<AppState>,
    Payload(request): Payload<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cookie = check_login(&state.auth, &request.password)?;
    Ok((StatusCode::NO_CONTENT, [(SET_COOKIE, cookie)]))
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, removal_cookie(&state.auth).to_string())],
    )
}

pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Json<AuthStatus> {
    Json(AuthStatus {
        authenticated: is_authenticated(&headers, &state.auth),
    })
}
