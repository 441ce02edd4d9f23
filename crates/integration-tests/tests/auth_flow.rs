//! Integration tests for registration, login, logout, and the session
//! lifecycle, driven over HTTP with cookie-keeping clients.

use loftwood_integration_tests::{TestServer, registration_body};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_register_me_logout_roundtrip() {
    let server = TestServer::spawn().await;
    let client = server.client();

    // Register
    let resp = client
        .post(server.url("/api/auth/register"))
        .json(&registration_body("anna@example.com"))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("invalid register body");
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["email"], json!("anna@example.com"));
    assert_eq!(body["user"]["name"], json!("Test User"));
    // The identity projection never carries the password hash.
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("password").is_none());

    // The session cookie set by registration authenticates /me
    let resp = client
        .get(server.url("/api/auth/me"))
        .send()
        .await
        .expect("me request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("invalid me body");
    assert_eq!(body["user"]["email"], json!("anna@example.com"));
    assert_eq!(body["user"]["subscribe_news"], json!(true));
    assert!(body["user"].get("password_hash").is_none());

    // Logout
    let resp = client
        .post(server.url("/api/auth/logout"))
        .send()
        .await
        .expect("logout request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    // The session is gone server-side, not just the cookie
    let resp = client
        .get(server.url("/api/auth/me"))
        .send()
        .await
        .expect("me request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_as_bad_request() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let resp = client
        .post(server.url("/api/auth/register"))
        .json(&registration_body("bob@example.com"))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = server
        .client()
        .post(server.url("/api/auth/register"))
        .json(&registration_body("bob@example.com"))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("invalid error body");
    assert_eq!(body["error"], json!("A user with this email already exists"));
}

#[tokio::test]
async fn test_register_validation_messages() {
    let server = TestServer::spawn().await;
    let client = server.client();

    // Missing fields
    let resp = client
        .post(server.url("/api/auth/register"))
        .json(&json!({ "email": "x@example.com" }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("invalid error body");
    assert_eq!(body["error"], json!("Fill in all required fields"));

    // Mismatched confirmation
    let mut payload = registration_body("x@example.com");
    payload["confirmPassword"] = json!("abc124");
    let resp = client
        .post(server.url("/api/auth/register"))
        .json(&payload)
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("invalid error body");
    assert_eq!(body["error"], json!("Passwords do not match"));

    // Policy violations are collected, not short-circuited
    let mut payload = registration_body("x@example.com");
    payload["password"] = json!("abc");
    payload["confirmPassword"] = json!("abc");
    let resp = client
        .post(server.url("/api/auth/register"))
        .json(&payload)
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("invalid error body");
    let message = body["error"].as_str().expect("error is not a string");
    assert!(message.contains("at least 6 characters"));
    assert!(message.contains("at least one digit"));
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let server = TestServer::spawn().await;
    server
        .client()
        .post(server.url("/api/auth/register"))
        .json(&registration_body("carol@example.com"))
        .send()
        .await
        .expect("register request failed");

    let client = server.client();

    let wrong_password = client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "email": "carol@example.com", "password": "wrong1" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: Value = wrong_password.json().await.expect("invalid error body");

    let unknown_email = client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "email": "nobody@example.com", "password": "abc123" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email: Value = unknown_email.json().await.expect("invalid error body");

    // Same message for both; no account enumeration.
    assert_eq!(wrong_password["error"], unknown_email["error"]);
    assert_eq!(wrong_password["error"], json!("Invalid email or password"));
}

#[tokio::test]
async fn test_login_establishes_session() {
    let server = TestServer::spawn().await;
    server
        .client()
        .post(server.url("/api/auth/register"))
        .json(&registration_body("dave@example.com"))
        .send()
        .await
        .expect("register request failed");

    // A fresh client with no cookies logs in
    let client = server.client();
    let resp = client
        .post(server.url("/api/auth/login"))
        .json(&json!({
            "email": "dave@example.com",
            "password": "abc123",
            "remember": true,
        }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("invalid login body");
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["email"], json!("dave@example.com"));

    let resp = client
        .get(server.url("/api/auth/me"))
        .send()
        .await
        .expect("me request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_clears_expired_session_cookie() {
    let server = TestServer::spawn().await;
    let client = server.client();

    client
        .post(server.url("/api/auth/register"))
        .json(&registration_body("helen@example.com"))
        .send()
        .await
        .expect("register request failed");

    // Expire the session server-side; the browser still holds the cookie.
    sqlx::query("UPDATE sessions SET expires_at = ?1")
        .bind("2000-01-01T00:00:00+00:00")
        .execute(&server.pool)
        .await
        .expect("failed to expire session");

    let resp = client
        .get(server.url("/api/auth/me"))
        .send()
        .await
        .expect("me request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .expect("expired session cookie was not cleared")
        .to_str()
        .expect("invalid set-cookie header");
    assert!(set_cookie.starts_with("sessionId="));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_check_never_fails() {
    let server = TestServer::spawn().await;

    // No cookie at all
    let resp = server
        .client()
        .get(server.url("/api/auth/check"))
        .send()
        .await
        .expect("check request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("invalid check body");
    assert_eq!(body["authenticated"], json!(false));
    assert!(body.get("user").is_none());

    // A garbage cookie answers false and is cleared
    let resp = server
        .client()
        .get(server.url("/api/auth/check"))
        .header("Cookie", "sessionId=not-a-real-token")
        .send()
        .await
        .expect("check request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .expect("stale cookie was not cleared")
        .to_str()
        .expect("invalid set-cookie header");
    assert!(set_cookie.starts_with("sessionId="));
    let body: Value = resp.json().await.expect("invalid check body");
    assert_eq!(body["authenticated"], json!(false));
}

#[tokio::test]
async fn test_check_reports_live_session() {
    let server = TestServer::spawn().await;
    let client = server.client();

    client
        .post(server.url("/api/auth/register"))
        .json(&registration_body("erin@example.com"))
        .send()
        .await
        .expect("register request failed");

    let resp = client
        .get(server.url("/api/auth/check"))
        .send()
        .await
        .expect("check request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("invalid check body");
    assert_eq!(body["authenticated"], json!(true));
    assert_eq!(body["user"]["email"], json!("erin@example.com"));
}

#[tokio::test]
async fn test_logout_without_session_still_succeeds() {
    let server = TestServer::spawn().await;

    let resp = server
        .client()
        .post(server.url("/api/auth/logout"))
        .send()
        .await
        .expect("logout request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("invalid logout body");
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let server = TestServer::spawn().await;

    let resp = server
        .client()
        .post(server.url("/api/auth/register"))
        .json(&registration_body("fred@example.com"))
        .send()
        .await
        .expect("register request failed");

    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .expect("no session cookie set")
        .to_str()
        .expect("invalid set-cookie header");

    assert!(set_cookie.starts_with("sessionId="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    // Registration grants a 7-day session
    assert!(set_cookie.contains(&format!("Max-Age={}", 7 * 24 * 60 * 60)));
}

#[tokio::test]
async fn test_client_store_mirrors_auth_state() {
    let server = TestServer::spawn().await;

    let api =
        loftwood_client::ApiClient::new(server.base_url.as_str()).expect("client build failed");
    let mut auth = loftwood_client::stores::AuthStore::new();

    auth.check(&api).await.expect("check failed");
    assert!(!auth.is_authenticated());

    auth.register(
        &api,
        &loftwood_client::api::RegisterPayload {
            name: "Grace".to_owned(),
            phone: None,
            email: "grace@example.com".to_owned(),
            password: "abc123".to_owned(),
            confirm_password: "abc123".to_owned(),
            subscribe_news: false,
        },
    )
    .await
    .expect("register failed");
    assert!(auth.is_authenticated());

    auth.fetch_profile(&api).await.expect("profile fetch failed");
    assert_eq!(
        auth.profile().expect("no profile").email,
        "grace@example.com"
    );

    auth.logout(&api).await.expect("logout failed");
    assert!(!auth.is_authenticated());
    assert!(auth.fetch_profile(&api).await.is_err());
}
