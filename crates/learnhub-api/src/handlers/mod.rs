//! HTTP request handlers, organized by domain.

pub mod auth;
pub mod certificate;
pub mod course;
pub mod health;
pub mod progress;
pub mod purchase;
