//! # JSON API routes
//!
//! | Path | Methods | Admin |
//! |------|---------|-------|
//! | `/api/health` | GET | — |
//! | `/api/profile` | GET, PUT | PUT |
//! | `/api/links`, `/api/notes`, `/api/learning` | GET, POST | POST |
//! | `/api/{collection}/{id}` | GET, PUT, DELETE | PUT, DELETE |
//! | `/api/auth/login`, `/api/auth/logout` | POST | — |
//! | `/api/auth/me` | GET | — |
//! | `/api/migrate` | POST | yes |

mod admin;
mod auth;
mod links;
mod profile;
mod records;

use axum::{
    routing::{get, post},
    Router,
};
use store::{LearningItem, Link, Note, Record};

use crate::state::AppState;

pub use auth::{check_login, AuthStatus};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(admin::health))
        .route("/api/migrate", post(admin::migrate))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::put_profile),
        )
        .route(
            "/api/links",
            get(links::list_links).post(records::create::<Link>),
        )
        .route("/api/links/{id}", item_routes::<Link>())
        .merge(collection_routes::<Note>("/api/notes"))
        .merge(collection_routes::<LearningItem>("/api/learning"))
}

fn collection_routes<T: Record>(base: &str) -> Router<AppState> {
    Router::new()
        .route(base, get(records::list::<T>).post(records::create::<T>))
        .route(&format!("{base}/{{id}}"), item_routes::<T>())
}

fn item_routes<T: Record>() -> axum::routing::MethodRouter<AppState> {
    get(records::get_one::<T>)
        .put(records::update::<T>)
        .delete(records::delete::<T>)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, HeaderMap, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use store::{DataStore, FileStore, ResilienceConfig};
    use tower::ServiceExt;

    use super::*;
    use crate::settings::Auth;

    struct TestApp {
        router: Router,
        _dir: tempfile::TempDir,
    }

    fn app() -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::fallback_only(FileStore::new(dir.path()), ResilienceConfig::default());
        let state = AppState {
            store: Arc::new(store),
            auth: Arc::new(Auth {
                password: "letmein".into(),
                token: "secret-token".into(),
                cookie_name: "admin_token".into(),
                secure_cookie: false,
            }),
        };
        TestApp {
            router: router().with_state(state),
            _dir: dir,
        }
    }

    const ADMIN: &str = "admin_token=secret-token";

    async fn send(
        app: &TestApp,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    #[tokio::test]
    async fn test_admin_routes_reject_anonymous() {
        let app = app();
        let note = json!({ "title": "Hello", "content": "hi", "date": "2024-01-01" });

        let (status, _, body) =
            send(&app, Method::POST, "/api/notes", None, Some(note.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");

        let (status, _, _) = send(
            &app,
            Method::POST,
            "/api/notes",
            Some("admin_token=guess"),
            Some(note),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _, _) = send(&app, Method::DELETE, "/api/links/x", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _, _) = send(&app, Method::POST, "/api/migrate", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_sets_cookie() {
        let app = app();

        let (status, _, _) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "password": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, headers, _) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "password": "letmein" })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let set_cookie = headers[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with(ADMIN));

        let (_, _, body) = send(&app, Method::GET, "/api/auth/me", Some(ADMIN), None).await;
        assert_eq!(body, json!({ "authenticated": true }));
        let (_, _, body) = send(&app, Method::GET, "/api/auth/me", None, None).await;
        assert_eq!(body, json!({ "authenticated": false }));

        let (status, headers, _) =
            send(&app, Method::POST, "/api/auth/logout", Some(ADMIN), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(headers[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_note_lifecycle() {
        let app = app();

        let (status, _, created) = send(
            &app,
            Method::POST,
            "/api/notes",
            Some(ADMIN),
            Some(json!({ "title": "Hello", "content": "# Hi", "date": "2024-01-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert!(id.parse::<i64>().is_ok());

        let (status, _, fetched) =
            send(&app, Method::GET, &format!("/api/notes/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let edit = json!({ "title": "Hello again", "content": "# Hi", "date": "2024-01-02" });
        let (status, _, first) = send(
            &app,
            Method::PUT,
            &format!("/api/notes/{id}"),
            Some(ADMIN),
            Some(edit.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (_, _, second) = send(
            &app,
            Method::PUT,
            &format!("/api/notes/{id}"),
            Some(ADMIN),
            Some(edit),
        )
        .await;
        assert_eq!(first["title"], second["title"]);
        assert_eq!(first["createdAt"], created["createdAt"]);
        assert_eq!(second["createdAt"], created["createdAt"]);

        let (_, _, list) = send(&app, Method::GET, "/api/notes", None, None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, _, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/notes/{id}"),
            Some(ADMIN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, body) =
            send(&app, Method::GET, &format!("/api/notes/{id}"), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let app = app();
        let (status, _, _) = send(
            &app,
            Method::PUT,
            "/api/learning/404",
            Some(ADMIN),
            Some(json!({ "title": "Ghost", "date": "2024-01-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let app = app();

        let (status, _, body) = send(
            &app,
            Method::POST,
            "/api/links",
            Some(ADMIN),
            Some(json!({ "name": "", "url": "https://example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "name is required");

        let (status, _, body) = send(
            &app,
            Method::POST,
            "/api/learning",
            Some(ADMIN),
            Some(json!({ "description": "no title" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let app = app();
        let link = json!({ "id": "gh", "name": "GitHub", "url": "https://github.com", "category": "presence" });

        let (status, _, _) =
            send(&app, Method::POST, "/api/links", Some(ADMIN), Some(link.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _, _) =
            send(&app, Method::POST, "/api/links", Some(ADMIN), Some(link)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_links_by_category() {
        let app = app();
        for (id, category) in [("cv", "work"), ("gh", "presence"), ("blog", "work")] {
            let link = json!({ "id": id, "name": id, "url": format!("https://{id}.example"), "category": category });
            send(&app, Method::POST, "/api/links", Some(ADMIN), Some(link)).await;
        }

        let (_, _, all) = send(&app, Method::GET, "/api/links", None, None).await;
        let ids: Vec<&str> = all
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["cv", "gh", "blog"]);

        let (_, _, work) = send(&app, Method::GET, "/api/links?category=work", None, None).await;
        assert_eq!(work.as_array().unwrap().len(), 2);

        let (status, _, _) =
            send(&app, Method::GET, "/api/links?category=fun", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_profile_upsert() {
        let app = app();
        let (status, _, _) = send(&app, Method::GET, "/api/profile", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let profile = json!({
            "name": "Ada Lovelace",
            "title": "Engineer",
            "location": "London",
            "email": "ada@example.com",
            "skills": ["Rust", "Maths"],
            "interests": ["Engines"]
        });
        let (status, _, _) =
            send(&app, Method::PUT, "/api/profile", None, Some(profile.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _, saved) =
            send(&app, Method::PUT, "/api/profile", Some(ADMIN), Some(profile)).await;
        assert_eq!(status, StatusCode::OK);
        let (_, _, fetched) = send(&app, Method::GET, "/api/profile", None, None).await;
        assert_eq!(fetched, saved);
        assert_eq!(fetched["skills"][0], "Rust");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/notes")
            .header(header::COOKIE, ADMIN)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_and_migrate_without_document_store() {
        let app = app();
        let (status, _, body) = send(&app, Method::GET, "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "backend": "fallback" }));

        let (status, _, _) = send(&app, Method::POST, "/api/migrate", Some(ADMIN), None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
