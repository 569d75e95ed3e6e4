//! # learnhub-storage
//!
//! Filesystem-backed artifact storage for generated certificates, plus
//! the PDF renderer that produces them. The store is rooted at a
//! configured directory and serves files through the static route the
//! API mounts over the same directory.

pub mod artifact;
pub mod pdf;

pub use artifact::ArtifactStore;
pub use pdf::{CertificateDocument, render_certificate};
