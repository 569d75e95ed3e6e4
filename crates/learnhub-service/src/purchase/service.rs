//! Purchase lifecycle orchestration.
//!
//! Checkout runs synchronously: record a pending ledger row, then hand
//! the buyer off to the chosen gateway. Confirmation arrives later on
//! one of two asynchronous paths (a signed webhook for the hosted
//! provider, a re-verified browser redirect for the signed-form
//! provider); both converge on the same conditional completion UPDATE
//! and enrollment set-add, so duplicate deliveries are harmless.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use learnhub_core::config::payment::PaymentConfig;
use learnhub_core::error::AppError;
use learnhub_core::result::AppResult;
use learnhub_core::types::pagination::{PageRequest, PageResponse};
use learnhub_database::repositories::course::CourseRepository;
use learnhub_database::repositories::enrollment::EnrollmentRepository;
use learnhub_database::repositories::purchase::PurchaseRepository;
use learnhub_entity::course::{Course, Lecture};
use learnhub_entity::purchase::{CreatePurchase, PaymentMethod, Purchase};
use learnhub_payment::esewa::{EsewaGateway, VerifyOutcome};
use learnhub_payment::stripe::StripeGateway;
use learnhub_payment::types::{CheckoutMetadata, CheckoutRedirect};

use crate::context::RequestContext;

/// Webhook event type that confirms a hosted checkout.
const CHECKOUT_COMPLETED_EVENT: &str = "checkout.session.completed";

/// Orchestrates checkout, confirmation, and ownership queries.
#[derive(Debug, Clone)]
pub struct PurchaseService {
    course_repo: Arc<CourseRepository>,
    purchase_repo: Arc<PurchaseRepository>,
    enrollment_repo: Arc<EnrollmentRepository>,
    stripe: Arc<StripeGateway>,
    esewa: Arc<EsewaGateway>,
    config: PaymentConfig,
}

/// Course detail plus whether the acting user owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseStatus {
    /// The queried course.
    #[serde(flatten)]
    pub course: Course,
    /// Its lectures, in position order.
    pub lectures: Vec<Lecture>,
    /// True when a completed purchase or an enrollment exists.
    pub purchased: bool,
}

impl PurchaseService {
    /// Creates a new purchase service.
    pub fn new(
        course_repo: Arc<CourseRepository>,
        purchase_repo: Arc<PurchaseRepository>,
        enrollment_repo: Arc<EnrollmentRepository>,
        stripe: Arc<StripeGateway>,
        esewa: Arc<EsewaGateway>,
        config: PaymentConfig,
    ) -> Self {
        Self {
            course_repo,
            purchase_repo,
            enrollment_repo,
            stripe,
            esewa,
            config,
        }
    }

    /// Initiate a checkout for a course with the chosen gateway.
    ///
    /// Records a pending ledger row before contacting the gateway, so
    /// every attempt leaves a durable trace even if the buyer never
    /// completes payment. Pending rows from abandoned attempts are kept.
    pub async fn create_checkout(
        &self,
        ctx: &RequestContext,
        course_id: Uuid,
        method: PaymentMethod,
    ) -> AppResult<CheckoutRedirect> {
        let course = self
            .course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        if !course.is_published {
            return Err(AppError::validation("Course is not available for purchase"));
        }
        if self.is_owned(ctx.user_id, course_id).await? {
            return Err(AppError::conflict("Course already purchased"));
        }

        let reference = format!(
            "{}-{}-{}",
            method,
            Utc::now().timestamp_millis(),
            ctx.user_id
        );

        let purchase = self
            .purchase_repo
            .create(&CreatePurchase {
                user_id: ctx.user_id,
                course_id,
                amount: course.price,
                payment_reference: reference.clone(),
                payment_method: method,
            })
            .await?;

        info!(purchase_id = %purchase.id, course_id = %course_id, %method, "Checkout initiated");

        match method {
            PaymentMethod::Stripe => {
                let success_url =
                    format!("{}/course-progress/{course_id}", self.config.frontend_url);
                let cancel_url =
                    format!("{}/course-detail/{course_id}", self.config.frontend_url);

                let redirect = self
                    .stripe
                    .create_hosted_session(
                        course.price,
                        &course.title,
                        &success_url,
                        &cancel_url,
                        &CheckoutMetadata {
                            user_id: ctx.user_id,
                            course_id,
                            payment_reference: reference,
                        },
                    )
                    .await?;

                // The session id is the reference the webhook will carry.
                if let CheckoutRedirect::Hosted { session_id, .. } = &redirect {
                    self.purchase_repo
                        .update_reference(purchase.id, session_id)
                        .await?;
                }

                Ok(redirect)
            }
            PaymentMethod::Esewa => {
                let success_url = format!(
                    "{}/api/purchase/verify/esewa?reference={reference}",
                    self.config.backend_url
                );
                let failure_url = format!(
                    "{}/course-detail/{course_id}?error=payment_failed",
                    self.config.frontend_url
                );

                self.esewa
                    .build_signed_form(course.price, &reference, &success_url, &failure_url)
            }
        }
    }

    /// Handle a hosted-checkout webhook delivery.
    ///
    /// Verifies the signature over the raw body, then applies the
    /// completion. Event types other than session completion are
    /// acknowledged and ignored. Redelivery converges: the conditional
    /// UPDATE and the enrollment set-add are both idempotent.
    pub async fn handle_stripe_webhook(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> AppResult<()> {
        let event = self.stripe.verify_and_parse_event(payload, signature_header)?;

        if event.event_type != CHECKOUT_COMPLETED_EVENT {
            info!(event_type = %event.event_type, "Ignoring webhook event");
            return Ok(());
        }

        let session = event.data.object;
        // The gateway reports minor units; the ledger stores whole units.
        let amount = session.amount_total.map(|a| a / 100);

        let purchase = self
            .purchase_repo
            .mark_completed(&session.id, amount)
            .await?
            .ok_or_else(|| AppError::not_found("No purchase matches this session"))?;

        self.enrollment_repo
            .add(purchase.user_id, purchase.course_id)
            .await?;

        info!(
            purchase_id = %purchase.id,
            user_id = %purchase.user_id,
            course_id = %purchase.course_id,
            "Purchase confirmed via webhook"
        );
        Ok(())
    }

    /// Confirm a signed-form purchase after the gateway redirected the
    /// buyer back. Returns the URL the browser should be sent to.
    ///
    /// The redirect itself is untrusted; the transaction is re-verified
    /// against the gateway's status endpoint before any state changes.
    pub async fn confirm_esewa_redirect(&self, reference: &str) -> AppResult<String> {
        let purchase = self
            .purchase_repo
            .find_by_reference(reference)
            .await?
            .ok_or_else(|| AppError::not_found("No purchase matches this reference"))?;

        let success_url = format!(
            "{}/course-progress/{}",
            self.config.frontend_url, purchase.course_id
        );
        let failure_url = format!(
            "{}/course-detail/{}?error=payment_failed",
            self.config.frontend_url, purchase.course_id
        );

        // Revisiting the success URL after confirmation is a no-op.
        if purchase.is_completed() {
            return Ok(success_url);
        }

        match self
            .esewa
            .verify_transaction(reference, purchase.amount)
            .await?
        {
            VerifyOutcome::Complete => {
                self.purchase_repo.mark_completed(reference, None).await?;
                self.enrollment_repo
                    .add(purchase.user_id, purchase.course_id)
                    .await?;

                info!(
                    purchase_id = %purchase.id,
                    user_id = %purchase.user_id,
                    course_id = %purchase.course_id,
                    "Purchase confirmed via redirect"
                );
                Ok(success_url)
            }
            VerifyOutcome::Incomplete(status) => {
                warn!(purchase_id = %purchase.id, %status, "Transaction not complete");
                Ok(failure_url)
            }
        }
    }

    /// Course detail with a derived ownership flag for the acting user.
    pub async fn course_status(
        &self,
        ctx: &RequestContext,
        course_id: Uuid,
    ) -> AppResult<CourseStatus> {
        let course = self
            .course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;
        let lectures = self.course_repo.find_lectures(course_id).await?;
        let purchased = self.is_owned(ctx.user_id, course_id).await?;

        Ok(CourseStatus {
            course,
            lectures,
            purchased,
        })
    }

    /// List completed purchases for the admin back-office.
    pub async fn list_completed(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Purchase>> {
        if !ctx.is_admin() {
            return Err(AppError::authorization("Admin access required"));
        }
        self.purchase_repo.list_completed(page).await
    }

    /// Ownership is a completed purchase or an enrollment; either one
    /// grants access, since grant paths can race.
    async fn is_owned(&self, user_id: Uuid, course_id: Uuid) -> AppResult<bool> {
        if self.purchase_repo.has_completed(user_id, course_id).await? {
            return Ok(true);
        }
        self.enrollment_repo.exists(user_id, course_id).await
    }
}
