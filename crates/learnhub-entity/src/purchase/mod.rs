//! Purchase ledger entities.

pub mod model;

pub use model::{CreatePurchase, PaymentMethod, Purchase, PurchaseStatus};
