//! Integration tests for review submission and listing.

use loftwood_integration_tests::TestServer;
use reqwest::StatusCode;
use serde_json::{Value, json};

fn review_body(product_id: i64, rating: i64, text: &str) -> Value {
    json!({
        "productId": product_id,
        "name": "Reviewer",
        "email": "reviewer@example.com",
        "rating": rating,
        "text": text,
    })
}

#[tokio::test]
async fn test_submit_and_list_newest_first() {
    let server = TestServer::spawn().await;
    server.seed_catalog().await;
    let client = server.client();

    for text in ["first review", "second review", "third review"] {
        let resp = client
            .post(server.url("/api/reviews"))
            .json(&review_body(1, 5, text))
            .send()
            .await
            .expect("review request failed");
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = resp.json().await.expect("invalid review body");
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["review"]["review_text"], json!(text));
    }

    let resp = client
        .get(server.url("/api/reviews/1"))
        .send()
        .await
        .expect("reviews request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let reviews: Vec<Value> = resp.json().await.expect("invalid reviews body");
    assert_eq!(reviews.len(), 3);
    assert_eq!(reviews[0]["review_text"], json!("third review"));
    assert_eq!(reviews[2]["review_text"], json!("first review"));
}

#[tokio::test]
async fn test_rating_bounds() {
    let server = TestServer::spawn().await;
    server.seed_catalog().await;
    let client = server.client();

    for rating in [0, 6, -1] {
        let resp = client
            .post(server.url("/api/reviews"))
            .json(&review_body(1, rating, "out of range"))
            .send()
            .await
            .expect("review request failed");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "rating {rating}");

        let body: Value = resp.json().await.expect("invalid error body");
        assert_eq!(body["error"], json!("Rating must be between 1 and 5"));
    }

    // Both bounds are accepted
    for rating in [1, 5] {
        let resp = client
            .post(server.url("/api/reviews"))
            .json(&review_body(1, rating, "at the bound"))
            .send()
            .await
            .expect("review request failed");
        assert_eq!(resp.status(), StatusCode::OK, "rating {rating}");
    }
}

#[tokio::test]
async fn test_missing_fields_and_unknown_product() {
    let server = TestServer::spawn().await;
    server.seed_catalog().await;
    let client = server.client();

    let resp = client
        .post(server.url("/api/reviews"))
        .json(&json!({ "productId": 1, "rating": 5 }))
        .send()
        .await
        .expect("review request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("invalid error body");
    assert_eq!(body["error"], json!("Fill in all fields"));

    let resp = client
        .post(server.url("/api/reviews"))
        .json(&review_body(999, 5, "for a ghost product"))
        .send()
        .await
        .expect("review request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("invalid error body");
    assert_eq!(body["error"], json!("Product not found"));
}

#[tokio::test]
async fn test_unknown_product_listing_is_empty() {
    let server = TestServer::spawn().await;
    server.seed_catalog().await;

    let resp = server
        .client()
        .get(server.url("/api/reviews/999"))
        .send()
        .await
        .expect("reviews request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let reviews: Vec<Value> = resp.json().await.expect("invalid reviews body");
    assert!(reviews.is_empty());
}

#[tokio::test]
async fn test_no_login_required() {
    let server = TestServer::spawn().await;
    server.seed_catalog().await;

    // A client with no cookies can submit
    let resp = server
        .client()
        .post(server.url("/api/reviews"))
        .json(&review_body(2, 4, "anonymous visitor"))
        .send()
        .await
        .expect("review request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_reviews_store_prepends_submission() {
    let server = TestServer::spawn().await;
    server.seed_catalog().await;

    let api =
        loftwood_client::ApiClient::new(server.base_url.as_str()).expect("client build failed");
    let mut store = loftwood_client::stores::ReviewsStore::new();

    let product = loftwood_core::ProductId::new(1);
    store.load(&api, product).await.expect("load failed");
    assert!(store.reviews_for(product).is_empty());

    store
        .add(
            &api,
            &loftwood_client::api::ReviewPayload {
                product_id: 1,
                name: "Store User".to_owned(),
                email: "store@example.com".to_owned(),
                rating: 5,
                text: "arrived quickly".to_owned(),
            },
        )
        .await
        .expect("add failed");

    let cached = store.reviews_for(product);
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].review_text, "arrived quickly");

    // A reload agrees with the cache
    store.load(&api, product).await.expect("reload failed");
    assert_eq!(store.reviews_for(product).len(), 1);
}
