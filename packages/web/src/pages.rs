//! HTML page handlers.

use api::auth::{is_authenticated, removal_cookie};
use api::routes::check_login;
use api::{ApiError, AppState};
use axum::{
    extract::{Path, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use store::{LearningItem, Link, MigrationReport, Note, Profile, StoreError};
use tracing::error;
use ui::pages::{
    AdminPage, AdminProps, Dashboard, ErrorPage, ErrorProps, HomePage, HomeProps, LearningPage,
    LearningProps, LoginPage, LoginProps, NotePage, NoteProps, NotesPage, NotesProps,
};
use ui::render_page;

const LOGIN_PATH: &str = "/admin/login";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/notes", get(notes))
        .route("/notes/{id}", get(note))
        .route("/learning", get(learning))
        .route("/admin", get(admin))
        .route(LOGIN_PATH, get(login_form).post(login))
        .route("/admin/logout", post(logout))
        .route("/admin/migrate", post(migrate))
}

/// Failure rendered as an HTML page with the matching status.
pub struct PageError(ApiError);

impl From<StoreError> for PageError {
    fn from(err: StoreError) -> Self {
        PageError(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let (heading, message) = match status {
            StatusCode::NOT_FOUND => ("Not found", self.0.to_string()),
            StatusCode::SERVICE_UNAVAILABLE => (
                "Temporarily unavailable",
                "The content store cannot be reached right now.".to_string(),
            ),
            _ => {
                error!(error = %self.0, "Page failed");
                ("Something went wrong", "Please try again later.".to_string())
            }
        };

        let page = render_page(
            ErrorPage,
            ErrorProps {
                heading: heading.to_string(),
                message,
            },
        );
        (status, Html(page)).into_response()
    }
}

pub async fn not_found() -> PageError {
    PageError(ApiError::NotFound("There is no page at this address.".into()))
}

async fn home(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let profile = match state.store.load_singleton::<Profile>().await {
        Ok(profile) => Some(profile),
        Err(StoreError::NotFound { .. }) => None,
        Err(e) => return Err(e.into()),
    };
    let links = state.store.list::<Link>().await?;

    Ok(Html(render_page(HomePage, HomeProps { profile, links })))
}

async fn notes(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let notes = state.store.list::<Note>().await?;
    Ok(Html(render_page(NotesPage, NotesProps { notes })))
}

async fn note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let note = state.store.get::<Note>(&id).await?;
    Ok(Html(render_page(NotePage, NoteProps { note })))
}

async fn learning(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let items = state.store.list::<LearningItem>().await?;
    Ok(Html(render_page(LearningPage, LearningProps { items })))
}

async fn dashboard(state: &AppState) -> Result<Dashboard, StoreError> {
    let has_profile = match state.store.load_singleton::<Profile>().await {
        Ok(_) => true,
        Err(StoreError::NotFound { .. }) => false,
        Err(e) => return Err(e),
    };

    Ok(Dashboard {
        backend: state.store.status().await,
        has_profile,
        links: state.store.list::<Link>().await?.len(),
        notes: state.store.list::<Note>().await?.len(),
        learning: state.store.list::<LearningItem>().await?.len(),
    })
}

async fn render_admin(
    state: &AppState,
    migration: Option<MigrationReport>,
) -> Result<Response, PageError> {
    let dashboard = dashboard(state).await?;
    let page = render_page(
        AdminPage,
        AdminProps {
            dashboard,
            migration,
        },
    );
    Ok(Html(page).into_response())
}

async fn admin(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, PageError> {
    if !is_authenticated(&headers, &state.auth) {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    }
    render_admin(&state, None).await
}

async fn login_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if is_authenticated(&headers, &state.auth) {
        return Redirect::to("/admin").into_response();
    }
    Html(render_page(LoginPage, LoginProps { error: None })).into_response()
}

#[derive(Deserialize)]
struct LoginForm {
    password: String,
}

async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match check_login(&state.auth, &form.password) {
        Ok(cookie) => ([(SET_COOKIE, cookie)], Redirect::to("/admin")).into_response(),
        Err(_) => {
            let error = if state.auth.is_configured() {
                "Wrong password."
            } else {
                "Admin login is not configured on this server."
            };
            let page = render_page(
                LoginPage,
                LoginProps {
                    error: Some(error.to_string()),
                },
            );
            (StatusCode::UNAUTHORIZED, Html(page)).into_response()
        }
    }
}

async fn logout(State(state): State<AppState>) -> Response {
    (
        [(SET_COOKIE, removal_cookie(&state.auth).to_string())],
        Redirect::to("/"),
    )
        .into_response()
}

async fn migrate(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, PageError> {
    if !is_authenticated(&headers, &state.auth) {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    }
    let report = state.store.migrate().await?;
    render_admin(&state, Some(report)).await
}
