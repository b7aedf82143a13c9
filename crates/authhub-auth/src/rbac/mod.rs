//! Role-based permission decisions.

pub mod engine;

pub use engine::{Authorizable, can_perform};
