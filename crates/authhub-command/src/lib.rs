//! # authhub-command
//!
//! The internal command/reply transport: newline-delimited JSON frames
//! over TCP, each carrying `{cmd, payload}`. Replies are the same logical
//! envelopes the HTTP API serializes, and failures are always structured
//! `{status: "Error", statusCode}` payloads, never protocol-level faults.
//!
//! The dispatcher is a thin adapter: every command calls the same service
//! methods the HTTP handlers call.

pub mod dispatch;
pub mod envelope;
pub mod server;

pub use server::CommandServer;
