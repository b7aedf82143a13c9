//! # authhub-core
//!
//! Core crate for AuthHub. Contains configuration schemas, the shared
//! response envelope, pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other AuthHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
