//! Integration tests for registration and login.

mod helpers;

use http::StatusCode;

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn register_creates_account_and_returns_token() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Asha Student",
                "email": "asha@test.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert!(response.body["data"]["token"].is_string());
    assert_eq!(response.body["data"]["user"]["email"], "asha@test.com");
    assert_eq!(response.body["data"]["user"]["role"], "student");
    // Password material never leaves the server.
    assert!(response.body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn register_rejects_duplicate_email() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("First", "dup@test.com", "password123", "student")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Second",
                "email": "dup@test.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn register_rejects_admin_role() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Sneaky",
                "email": "sneaky@test.com",
                "password": "password123",
                "role": "admin",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn register_rejects_short_password() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Short",
                "email": "short@test.com",
                "password": "abc",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn login_succeeds_with_valid_credentials() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("Login User", "login@test.com", "password123", "student")
        .await;

    let token = app.login("login@test.com", "password123").await;
    assert!(!token.is_empty());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn login_rejects_wrong_password() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("Login User", "wrongpw@test.com", "password123", "student")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "wrongpw@test.com",
                "password": "not-the-password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn login_rejects_unknown_email() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@test.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn me_requires_authentication() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn profile_update_changes_name() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("Old Name", "rename@test.com", "password123", "student")
        .await;
    let token = app.login("rename@test.com", "password123").await;

    let response = app
        .request(
            "PUT",
            "/api/auth/me",
            Some(serde_json::json!({ "name": "New Name" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "New Name");
}
