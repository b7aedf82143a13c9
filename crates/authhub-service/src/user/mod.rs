//! User management flows.

pub mod service;

pub use service::{NewUser, UserService};
