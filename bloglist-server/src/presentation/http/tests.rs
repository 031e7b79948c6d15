use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::data::repositories::Repositories;
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::settings::Settings;
use crate::presentation::AppState;
use crate::server::build_router;

const SECRET: &str = "0123456789abcdef0123456789abcdef";

fn test_app(enable_testing_routes: bool) -> Router {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("STORAGE_BACKEND", "memory"),
        ("JWT_SECRET", SECRET),
        (
            "ENABLE_TESTING_ROUTES",
            if enable_testing_routes { "true" } else { "false" },
        ),
    ]);
    let settings = Settings::from_lookup(|key| vars.get(key).map(|value| value.to_string()))
        .expect("test settings must load");

    let jwt = Arc::new(JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds));
    let state = AppState::new(Repositories::in_memory(), jwt);
    build_router(state, &settings).expect("router must build")
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request must build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body must be readable");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

async fn register(app: &Router, username: &str, name: &str, password: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "username": username, "name": name, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().expect("user id must be returned")
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["token"]
        .as_str()
        .expect("token must be returned")
        .to_string()
}

async fn create_blog(app: &Router, token: &str, title: &str, author: &str, likes: i64) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/blogs",
        Some(token),
        Some(json!({
            "title": title,
            "author": author,
            "url": "https://example.com/",
            "likes": likes
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = test_app(false);
    let (status, body) = send(&app, Method::GET, "/healthz", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn unknown_endpoint_is_json_404() {
    let app = test_app(false);
    let (status, body) = send(&app, Method::GET, "/api/nothing-here", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "unknown endpoint" }));
}

#[tokio::test]
async fn created_blog_is_linked_to_its_owner_both_ways() {
    let app = test_app(false);
    let user_id = register(&app, "root", "Superuser", "salainen").await;
    let token = login(&app, "root", "salainen").await;

    let created = create_blog(&app, &token, "React patterns", "Michael Chan", 7).await;
    assert_eq!(created["user"]["id"], json!(user_id));
    assert_eq!(created["user"]["username"], json!("root"));
    assert_eq!(created["likes"], json!(7));

    let (status, blogs) = send(&app, Method::GET, "/api/blogs", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(blogs.as_array().map(Vec::len), Some(1));
    assert_eq!(blogs[0]["user"]["name"], json!("Superuser"));

    let (status, user) = send(&app, Method::GET, &format!("/api/users/{user_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["blogs"][0]["id"], created["id"]);
    assert_eq!(user["blogs"][0]["title"], json!("React patterns"));
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn likes_default_to_zero() {
    let app = test_app(false);
    register(&app, "root", "", "salainen").await;
    let token = login(&app, "root", "salainen").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/blogs",
        Some(&token),
        Some(json!({ "title": "Type wars", "author": "Robert C. Martin" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["likes"], json!(0));
    assert_eq!(body["url"], Value::Null);
}

#[tokio::test]
async fn creating_blog_without_token_is_unauthorized() {
    let app = test_app(false);
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/blogs",
        None,
        Some(json!({ "title": "Type wars", "author": "Robert C. Martin" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn creating_blog_without_title_stores_nothing() {
    let app = test_app(false);
    register(&app, "root", "", "salainen").await;
    let token = login(&app, "root", "salainen").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/blogs",
        Some(&token),
        Some(json!({ "author": "Robert C. Martin", "likes": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (_, blogs) = send(&app, Method::GET, "/api/blogs", None, None).await;
    assert_eq!(blogs, json!([]));
}

#[tokio::test]
async fn negative_likes_are_rejected() {
    let app = test_app(false);
    register(&app, "root", "", "salainen").await;
    let token = login(&app, "root", "salainen").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/blogs",
        Some(&token),
        Some(json!({ "title": "Type wars", "author": "Robert C. Martin", "likes": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn likes_above_limit_are_rejected_and_stats_stay_consistent() {
    let app = test_app(false);
    register(&app, "root", "", "salainen").await;
    let token = login(&app, "root", "salainen").await;
    let first = create_blog(&app, &token, "Type wars", "Robert C. Martin", 1).await;
    create_blog(&app, &token, "First class tests", "Robert C. Martin", 1_000_000_000).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/blogs/{}", first["id"]),
        None,
        Some(json!({ "likes": i64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/blogs/{}", first["id"]),
        None,
        Some(json!({ "likes": 1_000_000_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, stats) = send(&app, Method::GET, "/api/blogs/stats", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_likes"], json!(2_000_000_000_i64));
    assert_eq!(stats["most_likes"]["likes"], json!(2_000_000_000_i64));
}

#[tokio::test]
async fn non_numeric_id_is_json_bad_request() {
    let app = test_app(false);

    for uri in ["/api/blogs/abc", "/api/users/abc"] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "{uri}: {body}");
    }

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/blogs/abc",
        None,
        Some(json!({ "likes": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = test_app(false);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request must build");

    let response = app.oneshot(request).await.expect("router is infallible");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_token_is_rejected_on_any_route() {
    let app = test_app(false);
    let (status, body) = send(&app, Method::GET, "/api/blogs", Some("garbage"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "token invalid" }));
}

#[tokio::test]
async fn only_owner_can_delete_blog() {
    let app = test_app(false);
    register(&app, "root", "", "salainen").await;
    register(&app, "mluukkai", "Matti Luukkainen", "salainen").await;
    let owner_token = login(&app, "root", "salainen").await;
    let other_token = login(&app, "mluukkai", "salainen").await;

    let blog = create_blog(&app, &owner_token, "Type wars", "Robert C. Martin", 2).await;
    let uri = format!("/api/blogs/{}", blog["id"]);

    let (status, _) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, owner) = send(&app, Method::GET, "/api/users", None, None).await;
    assert_eq!(owner[0]["blogs"], json!([]));
}

#[tokio::test]
async fn blog_update_needs_no_token() {
    let app = test_app(false);
    register(&app, "root", "", "salainen").await;
    let token = login(&app, "root", "salainen").await;
    let blog = create_blog(&app, &token, "Type wars", "Robert C. Martin", 2).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/blogs/{}", blog["id"]),
        None,
        Some(json!({ "likes": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["likes"], json!(3));
    assert_eq!(body["title"], json!("Type wars"));

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/blogs/999",
        None,
        Some(json!({ "likes": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_username_is_conflict() {
    let app = test_app(false);
    register(&app, "root", "", "salainen").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "username": "root", "password": "another" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().is_some_and(|msg| msg.contains("username")));
}

#[tokio::test]
async fn short_username_is_rejected() {
    let app = test_app(false);
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "username": "ro", "password": "salainen" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, users) = send(&app, Method::GET, "/api/users", None, None).await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = test_app(false);
    register(&app, "root", "", "salainen").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "root", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "invalid credentials" }));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "nobody", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_returns_profile_fields() {
    let app = test_app(false);
    register(&app, "mluukkai", "Matti Luukkainen", "salainen").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "mluukkai", "password": "salainen" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], json!("mluukkai"));
    assert_eq!(body["name"], json!("Matti Luukkainen"));
}

#[tokio::test]
async fn stats_aggregate_stored_blogs() {
    let app = test_app(false);
    register(&app, "root", "", "salainen").await;
    let token = login(&app, "root", "salainen").await;

    create_blog(&app, &token, "React patterns", "Michael Chan", 7).await;
    create_blog(&app, &token, "Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5).await;
    create_blog(&app, &token, "Canonical string reduction", "Edsger W. Dijkstra", 12).await;

    let (status, stats) = send(&app, Method::GET, "/api/blogs/stats", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_blogs"], json!(3));
    assert_eq!(stats["total_likes"], json!(24));
    assert_eq!(
        stats["favorite_blog"],
        json!({ "title": "Canonical string reduction", "author": "Edsger W. Dijkstra", "likes": 12 })
    );
    assert_eq!(
        stats["most_blogs"],
        json!({ "author": "Edsger W. Dijkstra", "blogs": 2 })
    );
    assert_eq!(
        stats["most_likes"],
        json!({ "author": "Edsger W. Dijkstra", "likes": 17 })
    );
}

#[tokio::test]
async fn stats_over_empty_store() {
    let app = test_app(false);
    let (status, stats) = send(&app, Method::GET, "/api/blogs/stats", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_likes"], json!(0));
    assert_eq!(stats["favorite_blog"], Value::Null);
    assert_eq!(stats["most_blogs"], Value::Null);
}

#[tokio::test]
async fn deleting_user_removes_their_blogs() {
    let app = test_app(false);
    let root_id = register(&app, "root", "", "salainen").await;
    let other_id = register(&app, "mluukkai", "", "salainen").await;
    let token = login(&app, "root", "salainen").await;
    create_blog(&app, &token, "Type wars", "Robert C. Martin", 2).await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/users/{other_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/users/{root_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, blogs) = send(&app, Method::GET, "/api/blogs", None, None).await;
    assert_eq!(blogs, json!([]));
}

#[tokio::test]
async fn token_of_deleted_user_cannot_create_blogs() {
    let app = test_app(false);
    let root_id = register(&app, "root", "", "salainen").await;
    let token = login(&app, "root", "salainen").await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/users/{root_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/blogs",
        Some(&token),
        Some(json!({ "title": "Type wars", "author": "Robert C. Martin" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string(), "{body}");
}

#[tokio::test]
async fn user_update_changes_password() {
    let app = test_app(false);
    let user_id = register(&app, "root", "", "salainen").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{user_id}"),
        None,
        Some(json!({ "name": "Superuser", "password": "uusi-salasana" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["name"], json!("Superuser"));

    login(&app, "root", "uusi-salasana").await;
}

#[tokio::test]
async fn testing_reset_wipes_storage_when_enabled() {
    let app = test_app(true);
    register(&app, "root", "", "salainen").await;
    let token = login(&app, "root", "salainen").await;
    create_blog(&app, &token, "Type wars", "Robert C. Martin", 2).await;

    let (status, _) = send(&app, Method::POST, "/api/testing/reset", None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, blogs) = send(&app, Method::GET, "/api/blogs", None, None).await;
    let (_, users) = send(&app, Method::GET, "/api/users", None, None).await;
    assert_eq!(blogs, json!([]));
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn testing_reset_is_absent_by_default() {
    let app = test_app(false);
    let (status, _) = send(&app, Method::POST, "/api/testing/reset", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
