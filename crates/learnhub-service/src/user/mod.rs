//! Account operations: registration, login, and profile access.

pub mod service;

pub use service::{AuthenticatedUser, UserService};
