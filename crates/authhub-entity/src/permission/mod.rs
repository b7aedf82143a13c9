//! Permission domain entities.

pub mod model;

pub use model::{CreatePermission, Permission, PermissionKind, UpdatePermission};
