//! Authentication flows.

pub mod service;

pub use service::{AuthService, LoginSuccess};
