//! # authhub-database
//!
//! PostgreSQL connection management, migration runner, first-run seeding,
//! and repository implementations for AuthHub.
//!
//! Embedded role/permission/module snapshots live in JSONB columns on the
//! owning row, so grants and password changes are single-row atomic
//! updates; no transaction ever spans multiple users.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod seed;
