//! # learnhub-service
//!
//! Business logic services sitting between the HTTP layer and the
//! repositories. Services receive a [`context::RequestContext`] naming
//! the acting user and are handed their repositories and gateway
//! adapters at construction, so every collaborator can be swapped in
//! tests.

pub mod catalog;
pub mod certificate;
pub mod context;
pub mod progress;
pub mod purchase;
pub mod user;

pub use context::RequestContext;
