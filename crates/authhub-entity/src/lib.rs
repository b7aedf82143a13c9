//! # authhub-entity
//!
//! Domain entity models for AuthHub. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.
//!
//! Embedded role/permission/module snapshots are value objects copied from
//! the canonical records at grant time; they never track later edits.

pub mod company;
pub mod module;
pub mod permission;
pub mod role;
pub mod session;
pub mod user;
