//! Provider-neutral types returned to the purchase orchestrator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Redirect target handed back to the buyer's browser after checkout
/// initiation. Which variant is produced depends on the chosen provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckoutRedirect {
    /// Hosted checkout: send the browser to this URL.
    Hosted {
        /// Provider-assigned session identifier.
        session_id: String,
        /// Hosted checkout page URL.
        url: String,
    },
    /// Signed form: auto-submit a form with these fields to the target.
    SignedForm {
        /// Form action URL.
        target_url: String,
        /// Field name/value pairs, including the signature.
        form_fields: Vec<(String, String)>,
    },
}

/// Correlation metadata embedded in every checkout session so that the
/// confirmation step can map a gateway reference back to a purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutMetadata {
    /// The buying user.
    pub user_id: Uuid,
    /// The course being purchased.
    pub course_id: Uuid,
    /// Locally-generated payment reference.
    pub payment_reference: String,
}
