//! Stripe hosted-checkout adapter.
//!
//! Talks to the Checkout Sessions REST endpoint directly and verifies
//! webhook events with the `t=...,v1=...` HMAC-SHA256 signature scheme.

use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;

use learnhub_core::config::payment::StripeConfig;
use learnhub_core::error::AppError;
use learnhub_core::result::AppResult;

use crate::types::{CheckoutMetadata, CheckoutRedirect};

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted age of a webhook signature timestamp, in seconds.
const SIGNATURE_TOLERANCE_SECS: i64 = 300;

/// Request timeout applied to gateway calls.
const GATEWAY_TIMEOUT_SECS: u64 = 30;

/// Adapter for the hosted-checkout provider.
#[derive(Debug, Clone)]
pub struct StripeGateway {
    config: StripeConfig,
    client: Client,
}

/// A verified webhook event.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Event type, e.g. `checkout.session.completed`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event payload.
    pub data: StripeEventData,
}

/// The `data` envelope of a webhook event.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object the event describes.
    pub object: StripeCheckoutSession,
}

/// The subset of a checkout session object the confirmation step needs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCheckoutSession {
    /// Session identifier, stored as the purchase's payment reference.
    pub id: String,
    /// Authoritative total in minor currency units, when reported.
    #[serde(default)]
    pub amount_total: Option<i64>,
}

/// Response body of a session-creation call.
#[derive(Debug, Deserialize)]
struct CreateSessionResponse {
    id: String,
    url: Option<String>,
}

impl StripeGateway {
    /// Create a new adapter from configuration.
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(GATEWAY_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Create a hosted checkout session and return its redirect URL.
    ///
    /// `amount` is in whole currency units; the wire format wants minor
    /// units, so it is multiplied by 100 here and divided back on the
    /// webhook side.
    pub async fn create_hosted_session(
        &self,
        amount: i64,
        product_name: &str,
        success_url: &str,
        cancel_url: &str,
        metadata: &CheckoutMetadata,
    ) -> AppResult<CheckoutRedirect> {
        let unit_amount = (amount * 100).to_string();
        let user_id = metadata.user_id.to_string();
        let course_id = metadata.course_id.to_string();
        let params: Vec<(&str, &str)> = vec![
            ("mode", "payment"),
            ("payment_method_types[0]", "card"),
            ("line_items[0][quantity]", "1"),
            ("line_items[0][price_data][currency]", &self.config.currency),
            ("line_items[0][price_data][unit_amount]", &unit_amount),
            (
                "line_items[0][price_data][product_data][name]",
                product_name,
            ),
            ("success_url", success_url),
            ("cancel_url", cancel_url),
            ("metadata[userId]", &user_id),
            ("metadata[courseId]", &course_id),
            ("metadata[reference]", &metadata.payment_reference),
        ];

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.config.api_url))
            .bearer_auth(&self.config.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(format!("Checkout session request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "Checkout session creation returned {status}: {body}"
            )));
        }

        let session: CreateSessionResponse = response.json().await.map_err(|e| {
            AppError::external_service(format!("Invalid checkout session response: {e}"))
        })?;

        let url = session.url.ok_or_else(|| {
            AppError::external_service("Checkout session response carried no redirect URL")
        })?;

        debug!(session_id = %session.id, "Created hosted checkout session");

        Ok(CheckoutRedirect::Hosted {
            session_id: session.id,
            url,
        })
    }

    /// Verify a raw webhook payload against its signature header and
    /// parse the event.
    ///
    /// Fails with a gateway-verification error on tampering, secret
    /// mismatch, malformed headers, or stale timestamps (replay defense).
    pub fn verify_and_parse_event(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> AppResult<StripeEvent> {
        if !self.verify_signature(payload, signature_header, chrono::Utc::now().timestamp())? {
            return Err(AppError::gateway_verification(
                "Webhook signature verification failed",
            ));
        }

        serde_json::from_slice(payload)
            .map_err(|e| AppError::gateway_verification(format!("Malformed webhook payload: {e}")))
    }

    /// Check a `t=...,v1=...` signature header against the payload.
    ///
    /// `now` is injected so tolerance handling is testable.
    fn verify_signature(&self, payload: &[u8], header: &str, now: i64) -> AppResult<bool> {
        let mut timestamp: Option<&str> = None;
        let mut signatures: Vec<&str> = Vec::new();

        for part in header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => timestamp = Some(value),
                Some(("v1", value)) => signatures.push(value),
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or_else(|| {
            AppError::gateway_verification("Signature header missing timestamp")
        })?;
        if signatures.is_empty() {
            return Err(AppError::gateway_verification(
                "Signature header missing v1 signature",
            ));
        }

        let ts: i64 = timestamp.parse().map_err(|_| {
            AppError::gateway_verification("Signature header timestamp is not numeric")
        })?;
        if (now - ts).abs() > SIGNATURE_TOLERANCE_SECS {
            return Ok(false);
        }

        let mut mac = HmacSha256::new_from_slice(self.config.webhook_secret.as_bytes())
            .map_err(|e| AppError::internal(format!("HMAC init failed: {e}")))?;
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = hex::encode(mac.finalize().into_bytes());

        Ok(signatures.iter().any(|sig| constant_time_eq(sig, &expected)))
    }
}

/// Constant-time string comparison for signature checks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
