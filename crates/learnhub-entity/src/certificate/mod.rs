//! Certificate entity.

pub mod model;

pub use model::{Certificate, CreateCertificate};
