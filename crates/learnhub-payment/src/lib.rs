//! # learnhub-payment
//!
//! Gateway adapters for the two supported payment providers.
//!
//! Stripe is the hosted-checkout style: the adapter creates a checkout
//! session and hands back a single opaque redirect URL; confirmation
//! arrives as a signed webhook event. eSewa is the signed-form style: the
//! adapter builds an HMAC-signed form payload the browser auto-submits;
//! confirmation arrives as a browser redirect that is re-verified against
//! the gateway's synchronous status endpoint.
//!
//! Provider-specific field shapes stay inside this crate; the purchase
//! orchestrator only sees [`types::CheckoutRedirect`].

pub mod esewa;
pub mod stripe;
pub mod types;

pub use esewa::EsewaGateway;
pub use stripe::StripeGateway;
pub use types::CheckoutRedirect;
