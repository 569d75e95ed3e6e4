//! Purchase ledger repository implementation.
//!
//! The confirmation paths rely on `mark_completed` being a single
//! conditional UPDATE keyed by payment reference, so re-delivering the
//! same confirmation event converges on the same row state.

use sqlx::PgPool;
use uuid::Uuid;

use learnhub_core::error::{AppError, ErrorKind};
use learnhub_core::result::AppResult;
use learnhub_core::types::pagination::{PageRequest, PageResponse};
use learnhub_entity::purchase::{CreatePurchase, Purchase};

/// Repository for purchase ledger rows.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: PgPool,
}

impl PurchaseRepository {
    /// Create a new purchase repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a new pending purchase attempt.
    pub async fn create(&self, data: &CreatePurchase) -> AppResult<Purchase> {
        sqlx::query_as::<_, Purchase>(
            "INSERT INTO purchases (user_id, course_id, amount, status, payment_reference, payment_method) \
             VALUES ($1, $2, $3, 'pending', $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.course_id)
        .bind(data.amount)
        .bind(&data.payment_reference)
        .bind(data.payment_method)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create purchase", e))
    }

    /// Find a purchase by its payment reference.
    pub async fn find_by_reference(&self, reference: &str) -> AppResult<Option<Purchase>> {
        sqlx::query_as::<_, Purchase>("SELECT * FROM purchases WHERE payment_reference = $1")
            .bind(reference)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find purchase", e)
            })
    }

    /// Replace the stored payment reference (Stripe assigns the session id
    /// after the row has been created).
    pub async fn update_reference(&self, id: Uuid, reference: &str) -> AppResult<Purchase> {
        sqlx::query_as::<_, Purchase>(
            "UPDATE purchases SET payment_reference = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(reference)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update payment reference", e)
        })
    }

    /// Transition the purchase matching `reference` to completed,
    /// optionally overwriting the amount with the gateway's authoritative
    /// figure. Safe to apply more than once.
    pub async fn mark_completed(
        &self,
        reference: &str,
        amount: Option<i64>,
    ) -> AppResult<Option<Purchase>> {
        sqlx::query_as::<_, Purchase>(
            "UPDATE purchases SET status = 'completed', \
             amount = COALESCE($2, amount), updated_at = NOW() \
             WHERE payment_reference = $1 RETURNING *",
        )
        .bind(reference)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to complete purchase", e)
        })
    }

    /// Check whether a completed purchase exists for the pair.
    pub async fn has_completed(&self, user_id: Uuid, course_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM purchases \
             WHERE user_id = $1 AND course_id = $2 AND status = 'completed')",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check purchase status", e)
        })
    }

    /// List completed purchases, newest first (admin back-office).
    pub async fn list_completed(&self, page: &PageRequest) -> AppResult<PageResponse<Purchase>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM purchases WHERE status = 'completed'")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count purchases", e)
                })?;

        let purchases = sqlx::query_as::<_, Purchase>(
            "SELECT * FROM purchases WHERE status = 'completed' \
             ORDER BY updated_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list purchases", e))?;

        Ok(PageResponse::new(
            purchases,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
