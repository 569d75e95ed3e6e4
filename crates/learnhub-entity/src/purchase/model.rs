//! Purchase entity model.
//!
//! A purchase row is the durable ledger record of a checkout attempt.
//! Rows are created `pending` when a checkout session is requested and
//! transitioned to `completed` by exactly one of the asynchronous
//! confirmation paths (webhook or redirect). Rows are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle state of a purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "purchase_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    /// Checkout initiated, awaiting gateway confirmation.
    Pending,
    /// Payment confirmed by the gateway.
    Completed,
}

/// The payment provider chosen for a purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Hosted-checkout provider: a single opaque redirect URL.
    Stripe,
    /// Signed-form provider: the caller auto-submits a form payload.
    Esewa,
}

impl PaymentMethod {
    /// Return the method as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stripe => "stripe",
            Self::Esewa => "esewa",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = learnhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stripe" => Ok(Self::Stripe),
            "esewa" => Ok(Self::Esewa),
            _ => Err(learnhub_core::AppError::validation(format!(
                "Unsupported payment method: '{s}'. Expected one of: stripe, esewa"
            ))),
        }
    }
}

/// A purchase attempt and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Purchase {
    /// Unique purchase identifier.
    pub id: Uuid,
    /// The buying user.
    pub user_id: Uuid,
    /// The course being purchased.
    pub course_id: Uuid,
    /// Amount in whole currency units.
    pub amount: i64,
    /// Lifecycle state.
    pub status: PurchaseStatus,
    /// Provider-assigned or locally-generated reference, unique per attempt.
    pub payment_reference: String,
    /// Which gateway handled the attempt.
    pub payment_method: PaymentMethod,
    /// When the attempt was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Purchase {
    /// Check if the purchase has been confirmed.
    pub fn is_completed(&self) -> bool {
        self.status == PurchaseStatus::Completed
    }
}

/// Data required to record a new purchase attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePurchase {
    /// The buying user.
    pub user_id: Uuid,
    /// The course being purchased.
    pub course_id: Uuid,
    /// Amount in whole currency units.
    pub amount: i64,
    /// Locally-generated reference for correlation.
    pub payment_reference: String,
    /// The chosen gateway.
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_from_str() {
        assert_eq!(
            "stripe".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::Stripe
        );
        assert_eq!(
            "Esewa".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::Esewa
        );
        assert!("paypal".parse::<PaymentMethod>().is_err());
    }
}
