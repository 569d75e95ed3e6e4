//! Certificate issuance: one immutable PDF per (student, course).

pub mod service;

pub use service::{CertificateService, CertificateStatus};
