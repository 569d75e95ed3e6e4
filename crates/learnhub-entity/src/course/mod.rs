//! Course and lecture entities.

pub mod lecture;
pub mod model;

pub use lecture::Lecture;
pub use model::{Course, CourseLevel, CreateCourse};
