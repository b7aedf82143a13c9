//! Role catalog flows.

pub mod service;

pub use service::{NewRole, RoleService};
