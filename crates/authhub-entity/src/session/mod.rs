//! Session audit domain entities.

pub mod model;

pub use model::{ClientMeta, CreateSession, Session};
