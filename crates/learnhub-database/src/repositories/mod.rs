//! Repository implementations, one per aggregate.

pub mod certificate;
pub mod course;
pub mod enrollment;
pub mod progress;
pub mod purchase;
pub mod user;
