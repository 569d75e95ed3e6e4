//! Lecture-level progress tracking with derived course completion.

pub mod service;

pub use service::{ProgressService, ProgressView};
