//! User domain entities.

pub mod model;
pub mod snapshot;

pub use model::{CreateUser, UpdateUser, User, UserProfile};
pub use snapshot::{ModuleSnapshot, PermissionSnapshot, RoleSnapshot};
