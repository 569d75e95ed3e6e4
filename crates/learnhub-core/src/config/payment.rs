//! Payment gateway configuration.

use serde::{Deserialize, Serialize};

/// Payment gateway configuration for both supported providers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Stripe (hosted checkout) settings.
    #[serde(default)]
    pub stripe: StripeConfig,
    /// eSewa (signed form) settings.
    #[serde(default)]
    pub esewa: EsewaConfig,
    /// Base URL of the browser frontend, used for redirect destinations.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// Publicly reachable base URL of this server, used for gateway
    /// callback targets.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
}

/// Stripe hosted-checkout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeConfig {
    /// Secret API key (`sk_...`).
    #[serde(default)]
    pub secret_key: String,
    /// Webhook endpoint signing secret (`whsec_...`).
    #[serde(default)]
    pub webhook_secret: String,
    /// Stripe API base URL. Overridable for tests.
    #[serde(default = "default_stripe_api_url")]
    pub api_url: String,
    /// ISO currency code used for checkout sessions.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            webhook_secret: String::new(),
            api_url: default_stripe_api_url(),
            currency: default_currency(),
        }
    }
}

/// eSewa signed-form configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsewaConfig {
    /// Merchant/product code assigned by eSewa.
    #[serde(default)]
    pub merchant_code: String,
    /// Shared secret used to sign form payloads.
    #[serde(default)]
    pub secret_key: String,
    /// URL of the hosted payment form the buyer is sent to.
    #[serde(default = "default_esewa_payment_url")]
    pub payment_url: String,
    /// URL of the synchronous transaction verification endpoint.
    #[serde(default = "default_esewa_verify_url")]
    pub verify_url: String,
}

impl Default for EsewaConfig {
    fn default() -> Self {
        Self {
            merchant_code: String::new(),
            secret_key: String::new(),
            payment_url: default_esewa_payment_url(),
            verify_url: default_esewa_verify_url(),
        }
    }
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_backend_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_stripe_api_url() -> String {
    "https://api.stripe.com".to_string()
}

fn default_currency() -> String {
    "npr".to_string()
}

fn default_esewa_payment_url() -> String {
    "https://rc-epay.esewa.com.np/api/epay/main/v2/form".to_string()
}

fn default_esewa_verify_url() -> String {
    "https://rc-epay.esewa.com.np/api/epay/transaction/status/".to_string()
}
