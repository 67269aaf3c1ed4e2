use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::COOKIE, request::Parts, HeaderMap},
};
use cookie::{Cookie, SameSite};
use subtle::ConstantTimeEq;
use time::Duration;

use crate::error::ApiError;
use crate::settings::Auth;
use crate::state::AppState;

/// Cookie granting admin access for a week.
pub fn session_cookie(auth: &Auth) -> Cookie<'static> {
    Cookie::build((auth.cookie_name.clone(), auth.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(auth.secure_cookie)
        .max_age(Duration::days(7))
        .build()
}

/// Expired cookie that makes the browser drop the admin cookie.
pub fn removal_cookie(auth: &Auth) -> Cookie<'static> {
    let mut cookie = Cookie::build((auth.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(auth.secure_cookie)
        .build();
    cookie.make_removal();
    cookie
}

/// Whether the request carries the admin cookie with the configured token.
pub fn is_authenticated(headers: &HeaderMap, auth: &Auth) -> bool {
    if !auth.is_configured() {
        return false;
    }
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .filter(|cookie| cookie.name() == auth.cookie_name)
        .any(|cookie| bool::from(cookie.value().as_bytes().ct_eq(auth.token.as_bytes())))
}

/// Extractor that rejects requests without a valid admin cookie.
pub struct Admin;

impl<S> FromRequestParts<S> for Admin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        if is_authenticated(&parts.headers, &state.auth) {
            Ok(Admin)
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}
