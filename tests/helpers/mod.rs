//! Shared helpers for the integration test suite.
//!
//! Tests run against a real PostgreSQL database configured by
//! `config/test.toml` (override with `LEARNHUB__DATABASE__URL`). Each
//! `TestApp::new()` wipes the test database, so tests that share one
//! database must not run concurrently against each other's data.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use learnhub_core::config::AppConfig;

/// A fully wired application instance backed by a clean test database.
pub struct TestApp {
    pub router: Router,
    pub db_pool: PgPool,
    pub config: AppConfig,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test configuration");

        let db_pool = learnhub_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");
        learnhub_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let state = learnhub_api::app::build_state(config.clone(), db_pool.clone())
            .await
            .expect("Failed to build application state");
        let router = learnhub_api::app::build_app(state);

        Self {
            router,
            db_pool,
            config,
        }
    }

    /// Clean all test data from the database.
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "certificates",
            "lecture_progress",
            "course_progress",
            "enrollments",
            "purchases",
            "lectures",
            "courses",
            "users",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {}", table);
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Create a user directly in the database and return their ID.
    pub async fn create_test_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Uuid {
        let hasher = learnhub_auth::password::PasswordHasher::new();
        let hash = hasher
            .hash_password(password)
            .expect("Failed to hash password");
        let id = Uuid::new_v4();

        sqlx::query(
            r#"INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5::user_role, NOW(), NOW())"#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(&hash)
        .bind(role)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test user");

        id
    }

    /// Create a course directly in the database and return its ID.
    pub async fn create_test_course(
        &self,
        creator_id: Uuid,
        title: &str,
        price: i64,
        is_published: bool,
    ) -> Uuid {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"INSERT INTO courses
                   (id, title, category, level, price, creator_id, is_published,
                    created_at, updated_at)
               VALUES ($1, $2, 'programming', 'beginner'::course_level, $3, $4, $5,
                       NOW(), NOW())"#,
        )
        .bind(id)
        .bind(title)
        .bind(price)
        .bind(creator_id)
        .bind(is_published)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test course");

        id
    }

    /// Add a lecture to a course and return its ID.
    pub async fn add_test_lecture(&self, course_id: Uuid, title: &str, position: i32) -> Uuid {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"INSERT INTO lectures (id, course_id, title, position, created_at)
               VALUES ($1, $2, $3, $4, NOW())"#,
        )
        .bind(id)
        .bind(course_id)
        .bind(title)
        .bind(position)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test lecture");

        id
    }

    /// Enroll a user in a course directly, bypassing the purchase flow.
    pub async fn enroll(&self, user_id: Uuid, course_id: Uuid) {
        sqlx::query(
            r#"INSERT INTO enrollments (user_id, course_id, enrolled_at)
               VALUES ($1, $2, NOW())
               ON CONFLICT DO NOTHING"#,
        )
        .bind(user_id)
        .bind(course_id)
        .execute(&self.db_pool)
        .await
        .expect("Failed to enroll test user");
    }

    /// Insert a purchase row directly and return its payment reference.
    pub async fn insert_purchase(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        amount: i64,
        status: &str,
        reference: &str,
        method: &str,
    ) {
        sqlx::query(
            r#"INSERT INTO purchases
                   (id, user_id, course_id, amount, status, payment_reference,
                    payment_method, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5::purchase_status, $6, $7::payment_method,
                       NOW(), NOW())"#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(course_id)
        .bind(amount)
        .bind(status)
        .bind(reference)
        .bind(method)
        .execute(&self.db_pool)
        .await
        .expect("Failed to insert test purchase");
    }

    /// Login through the API and return a JWT.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a pre-built request, for tests that need custom headers.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: Value,
}
