//! Integration tests for avatar upload, replacement, serving, and removal.

use loftwood_integration_tests::{TestServer, registration_body};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};

async fn registered_client(server: &TestServer, email: &str) -> reqwest::Client {
    let client = server.client();
    let resp = client
        .post(server.url("/api/auth/register"))
        .json(&registration_body(email))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    client
}

fn avatar_form(content_type: &str, bytes: Vec<u8>) -> Form {
    let part = Part::bytes(bytes)
        .file_name("avatar.bin")
        .mime_str(content_type)
        .expect("invalid content type");
    Form::new().part("avatar", part)
}

#[tokio::test]
async fn test_upload_serve_and_delete() {
    let server = TestServer::spawn().await;
    let client = registered_client(&server, "ann@example.com").await;

    let resp = client
        .post(server.url("/api/auth/avatar"))
        .multipart(avatar_form("image/png", b"fake png bytes".to_vec()))
        .send()
        .await
        .expect("upload request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("invalid upload body");
    assert_eq!(body["success"], json!(true));
    let avatar = body["avatar"].as_str().expect("no avatar path");
    assert!(avatar.starts_with("/uploads/avatars/"));
    assert!(avatar.ends_with(".png"));

    // The profile now carries the avatar path
    let resp = client
        .get(server.url("/api/auth/me"))
        .send()
        .await
        .expect("me request failed");
    let profile: Value = resp.json().await.expect("invalid me body");
    assert_eq!(profile["user"]["avatar"], json!(avatar));

    // The file is served back under /uploads
    let resp = client
        .get(server.url(avatar))
        .send()
        .await
        .expect("avatar fetch failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.bytes().await.expect("invalid avatar bytes").as_ref(),
        b"fake png bytes"
    );

    // Delete, twice: idempotent
    for _ in 0..2 {
        let resp = client
            .delete(server.url("/api/auth/avatar"))
            .send()
            .await
            .expect("delete request failed");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = client
        .get(server.url("/api/auth/me"))
        .send()
        .await
        .expect("me request failed");
    let profile: Value = resp.json().await.expect("invalid me body");
    assert_eq!(profile["user"]["avatar"], json!(null));

    let resp = client
        .get(server.url(avatar))
        .send()
        .await
        .expect("avatar fetch failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_replacement_removes_old_file() {
    let server = TestServer::spawn().await;
    let client = registered_client(&server, "ben@example.com").await;

    let first: Value = client
        .post(server.url("/api/auth/avatar"))
        .multipart(avatar_form("image/png", b"first".to_vec()))
        .send()
        .await
        .expect("upload request failed")
        .json()
        .await
        .expect("invalid upload body");
    let first = first["avatar"].as_str().expect("no avatar path").to_owned();

    // Filenames carry a millisecond timestamp
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let second: Value = client
        .post(server.url("/api/auth/avatar"))
        .multipart(avatar_form("image/jpeg", b"second".to_vec()))
        .send()
        .await
        .expect("upload request failed")
        .json()
        .await
        .expect("invalid upload body");
    let second = second["avatar"].as_str().expect("no avatar path").to_owned();

    assert_ne!(first, second);
    assert!(second.ends_with(".jpg"));

    let first_path = server
        .uploads_dir
        .join(first.trim_start_matches("/uploads/"));
    let second_path = server
        .uploads_dir
        .join(second.trim_start_matches("/uploads/"));
    assert!(!first_path.exists(), "old avatar file not removed");
    assert!(second_path.exists(), "new avatar file missing");
}

#[tokio::test]
async fn test_unsupported_type_is_rejected() {
    let server = TestServer::spawn().await;
    let client = registered_client(&server, "cat@example.com").await;

    let resp = client
        .post(server.url("/api/auth/avatar"))
        .multipart(avatar_form("application/pdf", b"%PDF-1.4".to_vec()))
        .send()
        .await
        .expect("upload request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("invalid error body");
    assert_eq!(
        body["error"],
        json!("Only images are allowed (JPEG, PNG, GIF, WebP)")
    );
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let server = TestServer::spawn().await;
    let client = registered_client(&server, "dora@example.com").await;

    let oversized = vec![0u8; 5 * 1024 * 1024 + 1];
    let resp = client
        .post(server.url("/api/auth/avatar"))
        .multipart(avatar_form("image/png", oversized))
        .send()
        .await
        .expect("upload request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("invalid error body");
    assert_eq!(body["error"], json!("Image must be at most 5 MB"));
}

#[tokio::test]
async fn test_avatar_routes_require_session() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let resp = client
        .post(server.url("/api/auth/avatar"))
        .multipart(avatar_form("image/png", b"anon".to_vec()))
        .send()
        .await
        .expect("upload request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .delete(server.url("/api/auth/avatar"))
        .send()
        .await
        .expect("delete request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
