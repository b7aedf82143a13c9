//! # authhub-service
//!
//! Business logic services for AuthHub. Both transport adapters (HTTP and
//! the command transport) call into this crate, so every business rule
//! lives here exactly once.

pub mod auth;
pub mod company;
pub mod mail;
pub mod module;
pub mod permission;
pub mod role;
pub mod store;
pub mod user;
