pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::catalog::handlers as catalog;
use crate::profile::handlers as profile;
use crate::state::AppState;
use crate::tracking::handlers as tracking;
use crate::video::handlers as video;

pub fn build_router(state: AppState) -> Router {
    // Anything not matched below is looked up in the pre-built client bundle.
    let client_bundle = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        // Video access tokens for negotiation practice
        .route("/token", get(video::handle_token))
        // Companies and roles
        .route(
            "/api/companies",
            get(catalog::handle_list_companies).post(catalog::handle_create_company),
        )
        .route("/api/companies/:id", delete(catalog::handle_delete_company))
        .route(
            "/api/roles",
            get(catalog::handle_list_roles).post(catalog::handle_create_role),
        )
        // Users
        .route("/api/users", post(profile::handle_create_user))
        .route(
            "/api/user",
            get(profile::handle_get_user).patch(profile::handle_patch_user),
        )
        // Applications, offers, milestones
        .route(
            "/api/applications",
            get(tracking::handle_list_applications).post(tracking::handle_create_application),
        )
        .route("/api/cities", get(tracking::handle_list_cities))
        .route(
            "/api/offers",
            get(tracking::handle_list_offers).post(tracking::handle_create_offer),
        )
        .route("/api/offers/:id", patch(tracking::handle_decide_offer))
        .route(
            "/api/milestones",
            get(tracking::handle_list_milestones).post(tracking::handle_create_milestone),
        )
        .fallback_service(client_bundle)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use sqlx::PgPool;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, VideoConfig};
    use crate::video::token::VideoTokenIssuer;

    fn test_state(db: PgPool, static_dir: &Path) -> AppState {
        let config = Config {
            database_url: "postgres://careertrack@localhost/careertrack_test".into(),
            port: 0,
            static_dir: static_dir.to_path_buf(),
            video: VideoConfig {
                account_sid: "AC123".into(),
                api_key: "SK456".into(),
                api_secret: "video-secret".into(),
                token_ttl_secs: 60,
            },
        };
        AppState {
            db,
            video_tokens: VideoTokenIssuer::new(&config.video),
            config,
        }
    }

    /// A pool that never connects; enough for routes rejected before any query.
    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://careertrack@localhost/careertrack_test")
            .unwrap()
    }

    fn offline_app(static_dir: &Path) -> Router {
        build_router(test_state(lazy_pool(), static_dir))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(&offline_app(dir.path()), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_token_for_named_identity() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            &offline_app(dir.path()),
            get_request("/token?identity=alice&room=practice"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["identity"], "alice");
        assert_eq!(body["token"].as_str().unwrap().split('.').count(), 3);
    }

    #[tokio::test]
    async fn test_token_without_identity_uses_guest() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(&offline_app(dir.path()), get_request("/token")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["identity"].as_str().unwrap().starts_with("guest-"));
    }

    #[tokio::test]
    async fn test_token_rejects_oversized_identity() {
        let dir = tempfile::tempdir().unwrap();
        let uri = format!("/token?identity={}", "x".repeat(200));
        let (status, body) = send(&offline_app(dir.path()), get_request(&uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_roles_rejects_non_numeric_user_id() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            &offline_app(dir.path()),
            get_request("/api/roles?user_id=abc"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_patch_user_rejects_malformed_email() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            &offline_app(dir.path()),
            json_request("PATCH", "/api/user?id=1", json!({ "email": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_user_rejects_short_password() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            &offline_app(dir.path()),
            json_request(
                "POST",
                "/api/users",
                json!({ "email": "a@b.com", "username": "ab", "password": "short" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Password"));
    }

    #[tokio::test]
    async fn test_create_milestone_rejects_blank_name() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _) = send(
            &offline_app(dir.path()),
            json_request(
                "POST",
                "/api/milestones",
                json!({ "user_id": 1, "name": "   ", "description": "Shipped v1" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_whitespace_only_required_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = offline_app(dir.path());
        let requests = [
            json_request(
                "POST",
                "/api/users",
                json!({ "email": "a@b.com", "username": "   ", "password": "correct-horse" }),
            ),
            json_request("POST", "/api/companies", json!({ "name": "   " })),
            json_request(
                "POST",
                "/api/roles",
                json!({ "name": "   ", "company_id": 1 }),
            ),
        ];
        for request in requests {
            let (status, body) = send(&app, request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_undecodable_patch_gets_json_error_body() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            &offline_app(dir.path()),
            json_request("PATCH", "/api/user?id=1", json!({ "active_role": "lead" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("active_role"));
    }

    #[tokio::test]
    async fn test_non_json_body_gets_json_error_body() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/api/companies")
            .body(Body::from("name=Acme"))
            .unwrap();
        let (status, body) = send(&offline_app(dir.path()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_bad_path_id_gets_json_error_body() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/companies/acme")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&offline_app(dir.path()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_roles_rejects_combined_filters() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            &offline_app(dir.path()),
            get_request("/api/roles?user_id=1&company_id=2"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_serves_client_bundle() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<div id=\"root\"></div>").unwrap();
        std::fs::write(dir.path().join("bundle.js"), "console.log('hi');").unwrap();
        let app = offline_app(dir.path());

        let response = app.clone().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<div id=\"root\"></div>");

        let response = app.clone().oneshot(get_request("/bundle.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/missing.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires a live DATABASE_URL"]
    async fn test_profile_and_offer_flow_over_http(pool: PgPool) {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(pool, dir.path()));

        let (status, company) = send(
            &app,
            json_request("POST", "/api/companies", json!({ "name": "Acme" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let company_id = company["id"].as_i64().unwrap();

        let (status, role) = send(
            &app,
            json_request(
                "POST",
                "/api/roles",
                json!({ "name": "Engineer", "salary": 120000, "company_id": company_id }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let role_id = role["id"].as_i64().unwrap();

        let (status, user) = send(
            &app,
            json_request(
                "POST",
                "/api/users",
                json!({
                    "first_name": "Ada",
                    "last_name": "Byron",
                    "email": "a@b.com",
                    "username": "ab",
                    "password": "correct-horse"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(user.get("hash").is_none());
        let user_id = user["id"].as_i64().unwrap();

        let (status, application) = send(
            &app,
            json_request(
                "POST",
                "/api/applications",
                json!({ "user_id": user_id, "role_id": role_id, "location": "Austin" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/offers",
                json!({ "application_id": application["id"], "base_salary": 100000 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, roles) = send(
            &app,
            get_request(&format!("/api/roles?user_id={user_id}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(roles[0]["company"]["name"], "Acme");

        let (status, updated) = send(
            &app,
            json_request(
                "PATCH",
                &format!("/api/user?id={user_id}"),
                json!({
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "email": "",
                    "active_role": role_id
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["email"], "a@b.com");
        assert_eq!(updated["last_name"], "Lovelace");
        assert_eq!(updated["active_role"], role_id);

        // An untouched role selector submits an empty string.
        let (status, updated) = send(
            &app,
            json_request(
                "PATCH",
                &format!("/api/user?id={user_id}"),
                json!({
                    "first_name": "Ada",
                    "last_name": "King",
                    "email": "",
                    "active_role": ""
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["last_name"], "King");
        assert_eq!(updated["active_role"], role_id);

        let (status, _) = send(
            &app,
            json_request(
                "PATCH",
                &format!("/api/user?id={user_id}"),
                json!({ "active_role": role_id.to_string() }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/roles",
                json!({ "name": "Ghost", "company_id": 9999 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");

        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/api/companies/{company_id}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, delete).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, cities) = send(&app, get_request("/api/cities")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cities, json!([{ "city": "Austin" }]));
    }
}
