//! Router-level tests for public pages and routing behavior.
mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use forkful::{app, unwrap_ok, unwrap_some};

async fn get(path: &str) -> axum::response::Response {
    let router = app(common::test_state());
    let request = unwrap_ok!(Request::builder().uri(path).body(Body::empty()));
    unwrap_ok!(router.oneshot(request).await)
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = unwrap_ok!(response.into_body().collect().await).to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

fn location_header(response: &axum::response::Response) -> String {
    let location = unwrap_some!(response.headers().get(header::LOCATION));
    unwrap_ok!(location.to_str()).to_string()
}

// ==================== Static Pages ====================

#[tokio::test]
async fn test_home_page_renders() {
    let response = get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Forkful"));
    assert!(body.contains("Browse recipes"));
}

#[tokio::test]
async fn test_home_alias_renders() {
    let response = get("/home").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_articles_page_renders() {
    let response = get("/articles").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Articles"));
}

#[tokio::test]
async fn test_home_shows_login_links_when_logged_out() {
    let response = get("/").await;
    let body = body_string(response).await;
    assert!(body.contains("/login"));
    assert!(body.contains("/register"));
    assert!(!body.contains("/logout"));
}

// ==================== Account Pages ====================

#[tokio::test]
async fn test_login_page_renders_form() {
    let response = get("/login").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("form"));
    assert!(body.contains("password"));
}

#[tokio::test]
async fn test_register_page_renders_form() {
    let response = get("/register").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("form"));
    assert!(body.contains("username"));
}

#[tokio::test]
async fn test_register_invalid_form_redirects_back_with_flash() {
    // Validation rejects the form before any database work happens.
    let router = app(common::test_state());
    let request = unwrap_ok!(Request::builder()
        .method("POST")
        .uri("/register")
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded"
        )
        .body(Body::from("username=ab&email=not-an-email&password=short")));
    let response = unwrap_ok!(router.oneshot(request).await);

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_header(&response), "/register");

    let set_cookie = unwrap_some!(response.headers().get(header::SET_COOKIE));
    assert!(unwrap_ok!(set_cookie.to_str()).starts_with("__forkful_flash"));
}

#[tokio::test]
async fn test_logout_redirects_to_login_and_clears_session() {
    let response = get("/logout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_header(&response), "/login");

    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(|s| s.to_string()))
        .collect();
    assert!(cookies
        .iter()
        .any(|c| c.starts_with(forkful::middleware::auth::SESSION_COOKIE_NAME)));
}

// ==================== Search ====================

#[tokio::test]
async fn test_search_without_query_redirects_to_listing() {
    let router = app(common::test_state());
    let request = unwrap_ok!(Request::builder()
        .method("POST")
        .uri("/search")
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded"
        )
        .body(Body::from("query=")));
    let response = unwrap_ok!(router.oneshot(request).await);

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_header(&response), "/get_recipes/");
}

// ==================== Fallback ====================

#[tokio::test]
async fn test_unknown_route_redirects_home() {
    let response = get("/definitely/not/a/page").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_header(&response), "/");
}
