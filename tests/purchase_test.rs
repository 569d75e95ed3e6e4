//! Integration tests for checkout and the two confirmation paths.
//!
//! Gateway network calls are not exercised here; these tests cover the
//! ledger, the webhook signature gate, and the redirect confirmation
//! for purchases that are already settled.

mod helpers;

use axum::body::Body;
use hmac::{Hmac, Mac};
use http::{Request, StatusCode};
use sha2::Sha256;
use uuid::Uuid;

/// Sign a webhook payload the way the hosted gateway does.
fn stripe_signature(payload: &[u8], secret: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp();
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{timestamp}.").as_bytes());
    mac.update(payload);
    format!(
        "t={timestamp},v1={}",
        hex::encode(mac.finalize().into_bytes())
    )
}

async fn post_webhook(
    app: &helpers::TestApp,
    payload: &[u8],
    signature: Option<&str>,
) -> helpers::TestResponse {
    let mut req = Request::builder()
        .method("POST")
        .uri("/api/purchase/webhook/stripe")
        .header("Content-Type", "application/json");
    if let Some(sig) = signature {
        req = req.header("stripe-signature", sig);
    }
    let req = req
        .body(Body::from(payload.to_vec()))
        .expect("Failed to build request");
    app.send(req).await
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn checkout_requires_authentication() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/purchase/checkout",
            Some(serde_json::json!({
                "course_id": Uuid::new_v4(),
                "payment_method": "stripe",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn checkout_rejects_unknown_course() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("Buyer", "buyer1@test.com", "password123", "student")
        .await;
    let token = app.login("buyer1@test.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/purchase/checkout",
            Some(serde_json::json!({
                "course_id": Uuid::new_v4(),
                "payment_method": "esewa",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn checkout_rejects_unpublished_course() {
    let app = helpers::TestApp::new().await;
    let instructor = app
        .create_test_user("Instructor", "seller1@test.com", "password123", "instructor")
        .await;
    app.create_test_user("Buyer", "buyer2@test.com", "password123", "student")
        .await;
    let course_id = app.create_test_course(instructor, "Draft", 1000, false).await;
    let token = app.login("buyer2@test.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/purchase/checkout",
            Some(serde_json::json!({
                "course_id": course_id,
                "payment_method": "esewa",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn checkout_rejects_already_owned_course() {
    let app = helpers::TestApp::new().await;
    let instructor = app
        .create_test_user("Instructor", "seller2@test.com", "password123", "instructor")
        .await;
    let buyer = app
        .create_test_user("Buyer", "buyer3@test.com", "password123", "student")
        .await;
    let course_id = app
        .create_test_course(instructor, "Owned", 1000, true)
        .await;
    app.enroll(buyer, course_id).await;
    let token = app.login("buyer3@test.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/purchase/checkout",
            Some(serde_json::json!({
                "course_id": course_id,
                "payment_method": "esewa",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn checkout_rejects_unknown_payment_method() {
    let app = helpers::TestApp::new().await;
    let instructor = app
        .create_test_user("Instructor", "seller3@test.com", "password123", "instructor")
        .await;
    app.create_test_user("Buyer", "buyer4@test.com", "password123", "student")
        .await;
    let course_id = app
        .create_test_course(instructor, "Course", 1000, true)
        .await;
    let token = app.login("buyer4@test.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/purchase/checkout",
            Some(serde_json::json!({
                "course_id": course_id,
                "payment_method": "paypal",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn webhook_without_signature_is_rejected() {
    let app = helpers::TestApp::new().await;

    let response = post_webhook(&app, br#"{"type":"checkout.session.completed"}"#, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn webhook_with_bad_signature_is_rejected() {
    let app = helpers::TestApp::new().await;

    let payload = br#"{"type":"checkout.session.completed","data":{"object":{"id":"cs_x"}}}"#;
    let signature = stripe_signature(payload, "wrong-secret");
    let response = post_webhook(&app, payload, Some(&signature)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn webhook_completes_purchase_and_enrolls_buyer() {
    let app = helpers::TestApp::new().await;
    let instructor = app
        .create_test_user("Instructor", "seller4@test.com", "password123", "instructor")
        .await;
    let buyer = app
        .create_test_user("Buyer", "buyer5@test.com", "password123", "student")
        .await;
    let course_id = app
        .create_test_course(instructor, "Webhook Course", 500, true)
        .await;
    app.insert_purchase(buyer, course_id, 500, "pending", "cs_test_hook_1", "stripe")
        .await;

    let payload = br#"{"type":"checkout.session.completed","data":{"object":{"id":"cs_test_hook_1","amount_total":50000}}}"#;
    let secret = app.config.payment.stripe.webhook_secret.clone();
    let signature = stripe_signature(payload, &secret);

    let response = post_webhook(&app, payload, Some(&signature)).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let (status,): (String,) = sqlx::query_as(
        "SELECT status::TEXT FROM purchases WHERE payment_reference = 'cs_test_hook_1'",
    )
    .fetch_one(&app.db_pool)
    .await
    .expect("purchase row");
    assert_eq!(status, "completed");

    let (enrolled,): (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2)",
    )
    .bind(buyer)
    .bind(course_id)
    .fetch_one(&app.db_pool)
    .await
    .expect("enrollment check");
    assert!(enrolled);

    // Redelivery of the same event converges without error.
    let signature = stripe_signature(payload, &secret);
    let response = post_webhook(&app, payload, Some(&signature)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn webhook_for_unknown_session_is_not_found() {
    let app = helpers::TestApp::new().await;

    let payload = br#"{"type":"checkout.session.completed","data":{"object":{"id":"cs_no_such"}}}"#;
    let secret = app.config.payment.stripe.webhook_secret.clone();
    let signature = stripe_signature(payload, &secret);

    let response = post_webhook(&app, payload, Some(&signature)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn webhook_ignores_unrelated_events() {
    let app = helpers::TestApp::new().await;

    let payload =
        br#"{"type":"payment_intent.created","data":{"object":{"id":"pi_123"}}}"#;
    let secret = app.config.payment.stripe.webhook_secret.clone();
    let signature = stripe_signature(payload, &secret);

    let response = post_webhook(&app, payload, Some(&signature)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn esewa_verify_unknown_reference_is_not_found() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "GET",
            "/api/purchase/verify/esewa?reference=no-such-ref",
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn esewa_verify_settled_purchase_redirects_without_reverification() {
    let app = helpers::TestApp::new().await;
    let instructor = app
        .create_test_user("Instructor", "seller5@test.com", "password123", "instructor")
        .await;
    let buyer = app
        .create_test_user("Buyer", "buyer6@test.com", "password123", "student")
        .await;
    let course_id = app
        .create_test_course(instructor, "Esewa Course", 700, true)
        .await;
    app.insert_purchase(buyer, course_id, 700, "completed", "esewa-settled-1", "esewa")
        .await;

    let response = app
        .request(
            "GET",
            "/api/purchase/verify/esewa?reference=esewa-settled-1",
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let location = response
        .headers
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("redirect location");
    assert!(location.contains(&format!("/course-progress/{course_id}")));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn purchase_listing_is_admin_only() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("Student", "plain@test.com", "password123", "student")
        .await;
    app.create_test_user("Admin", "admin@test.com", "password123", "admin")
        .await;

    let token = app.login("plain@test.com", "password123").await;
    let response = app.request("GET", "/api/purchase", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let token = app.login("admin@test.com", "password123").await;
    let response = app.request("GET", "/api/purchase", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["items"].is_array());
}
