//! Purchase orchestration: checkout initiation and the two
//! gateway-specific confirmation paths.

pub mod service;

pub use service::{CourseStatus, PurchaseService};
