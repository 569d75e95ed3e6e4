//! Course progress entities.

pub mod model;

pub use model::{CourseProgress, LectureProgress};
