//! eSewa signed-form adapter.
//!
//! Checkout initiation builds an HMAC-SHA256-signed form payload the
//! browser auto-submits to the hosted payment form. Confirmation is a
//! browser redirect; the redirect handler re-verifies the transaction
//! against the synchronous status endpoint before trusting it.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;

use learnhub_core::config::payment::EsewaConfig;
use learnhub_core::error::AppError;
use learnhub_core::result::AppResult;

use crate::types::CheckoutRedirect;

type HmacSha256 = Hmac<Sha256>;

/// Request timeout applied to gateway calls.
const GATEWAY_TIMEOUT_SECS: u64 = 30;

/// Field names covered by the form signature, in signing order.
const SIGNED_FIELD_NAMES: &str = "total_amount,transaction_uuid,product_code";

/// Adapter for the signed-form provider.
#[derive(Debug, Clone)]
pub struct EsewaGateway {
    config: EsewaConfig,
    client: Client,
}

/// Outcome of a synchronous transaction verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The gateway reports the transaction as complete.
    Complete,
    /// Any other reported status (pending, failed, not found).
    Incomplete(String),
}

/// Response body of the status endpoint.
#[derive(Debug, Deserialize, Serialize)]
struct VerifyResponse {
    status: String,
}

impl EsewaGateway {
    /// Create a new adapter from configuration.
    pub fn new(config: EsewaConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(GATEWAY_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Build the signed form payload for a checkout attempt.
    ///
    /// The signature covers total_amount, transaction_uuid, and
    /// product_code; the buyer's browser submits the whole field set to
    /// the hosted form.
    pub fn build_signed_form(
        &self,
        amount: i64,
        transaction_uuid: &str,
        success_url: &str,
        failure_url: &str,
    ) -> AppResult<CheckoutRedirect> {
        let total_amount = amount.to_string();
        let signature =
            self.sign_fields(&total_amount, transaction_uuid, &self.config.merchant_code)?;

        let form_fields = vec![
            ("amount".to_string(), total_amount.clone()),
            ("tax_amount".to_string(), "0".to_string()),
            ("product_service_charge".to_string(), "0".to_string()),
            ("product_delivery_charge".to_string(), "0".to_string()),
            ("total_amount".to_string(), total_amount),
            ("transaction_uuid".to_string(), transaction_uuid.to_string()),
            ("product_code".to_string(), self.config.merchant_code.clone()),
            ("success_url".to_string(), success_url.to_string()),
            ("failure_url".to_string(), failure_url.to_string()),
            (
                "signed_field_names".to_string(),
                SIGNED_FIELD_NAMES.to_string(),
            ),
            ("signature".to_string(), signature),
        ];

        debug!(transaction_uuid, "Built signed checkout form");

        Ok(CheckoutRedirect::SignedForm {
            target_url: self.config.payment_url.clone(),
            form_fields,
        })
    }

    /// Re-verify a redirected transaction against the status endpoint.
    ///
    /// Only a reported `COMPLETE` status is treated as payment; anything
    /// else is surfaced so the caller can redirect to the failure
    /// destination without mutating any record.
    pub async fn verify_transaction(
        &self,
        transaction_uuid: &str,
        amount: i64,
    ) -> AppResult<VerifyOutcome> {
        let body = serde_json::json!({
            "productId": transaction_uuid,
            "amount": amount,
            "merchantCode": self.config.merchant_code,
        });

        let response = self
            .client
            .post(&self.config.verify_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(format!("Transaction verification failed: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Transaction verification returned {}",
                response.status()
            )));
        }

        let verify: VerifyResponse = response.json().await.map_err(|e| {
            AppError::external_service(format!("Invalid verification response: {e}"))
        })?;

        if verify.status == "COMPLETE" {
            Ok(VerifyOutcome::Complete)
        } else {
            Ok(VerifyOutcome::Incomplete(verify.status))
        }
    }

    /// HMAC-SHA256 over the signed fields, base64-encoded.
    fn sign_fields(
        &self,
        total_amount: &str,
        transaction_uuid: &str,
        product_code: &str,
    ) -> AppResult<String> {
        let message = format!(
            "total_amount={total_amount},transaction_uuid={transaction_uuid},product_code={product_code}"
        );

        let mut mac = HmacSha256::new_from_slice(self.config.secret_key.as_bytes())
            .map_err(|e| AppError::internal(format!("HMAC init failed: {e}")))?;
        mac.update(message.as_bytes());

        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }
}
