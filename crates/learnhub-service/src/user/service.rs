//! User account operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use learnhub_auth::jwt::JwtEncoder;
use learnhub_auth::password::PasswordHasher;
use learnhub_core::config::auth::AuthConfig;
use learnhub_core::error::AppError;
use learnhub_core::result::AppResult;
use learnhub_database::repositories::enrollment::EnrollmentRepository;
use learnhub_database::repositories::user::UserRepository;
use learnhub_entity::course::Course;
use learnhub_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

/// Handles registration, login, and profile access.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    enrollment_repo: Arc<EnrollmentRepository>,
    hasher: Arc<PasswordHasher>,
    jwt_encoder: Arc<JwtEncoder>,
    password_min_length: usize,
}

/// A user together with their freshly issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The account.
    pub user: User,
    /// Signed JWT access token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        enrollment_repo: Arc<EnrollmentRepository>,
        hasher: Arc<PasswordHasher>,
        jwt_encoder: Arc<JwtEncoder>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            enrollment_repo,
            hasher,
            jwt_encoder,
            password_min_length: config.password_min_length,
        }
    }

    /// Register a new account and issue its first token.
    ///
    /// Email uniqueness is case-insensitive. Admin accounts cannot be
    /// self-registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> AppResult<AuthenticatedUser> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }
        if !email.contains('@') || !email.contains('.') {
            return Err(AppError::validation("Invalid email format"));
        }
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }
        if matches!(role, UserRole::Admin) {
            return Err(AppError::validation("Cannot self-register as admin"));
        }

        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                name: name.trim().to_string(),
                email: email.to_lowercase(),
                password_hash,
                role,
            })
            .await?;

        info!(user_id = %user.id, "User registered");

        self.issue_token(user)
    }

    /// Authenticate by email and password.
    ///
    /// Unknown email and wrong password produce the same error, so the
    /// response does not leak which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthenticatedUser> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid email or password"));
        }

        info!(user_id = %user.id, "User logged in");

        self.issue_token(user)
    }

    /// Gets the current user's full profile.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's display name and/or photo.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        name: Option<&str>,
        photo_url: Option<&str>,
    ) -> AppResult<User> {
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name cannot be empty"));
            }
        }

        self.user_repo
            .update_profile(ctx.user_id, name, photo_url)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Lists the courses the current user is enrolled in.
    pub async fn enrolled_courses(&self, ctx: &RequestContext) -> AppResult<Vec<Course>> {
        self.enrollment_repo.courses_for_user(ctx.user_id).await
    }

    fn issue_token(&self, user: User) -> AppResult<AuthenticatedUser> {
        let (token, expires_at) =
            self.jwt_encoder
                .generate_access_token(user.id, user.role, &user.name)?;
        Ok(AuthenticatedUser {
            user,
            token,
            expires_at,
        })
    }
}
