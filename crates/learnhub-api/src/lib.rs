//! # learnhub-api
//!
//! HTTP API layer for LearnHub built on Axum.
//!
//! Provides the REST endpoints, middleware (auth, CORS, logging),
//! extractors, DTOs, and error mapping. The generated certificate PDFs
//! are served as static files from the artifact directory.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::run_server;
pub use state::AppState;
