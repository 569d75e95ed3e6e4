//! Course catalog: public reads plus instructor authoring.

pub mod service;

pub use service::{CatalogService, CourseDetail};
