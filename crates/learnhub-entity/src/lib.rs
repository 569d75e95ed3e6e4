//! # learnhub-entity
//!
//! Domain entity models for LearnHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod certificate;
pub mod course;
pub mod enrollment;
pub mod progress;
pub mod purchase;
pub mod user;
