//! # authhub-api
//!
//! The HTTP transport adapter: an Axum router over the shared services.
//! Handlers stay thin — they parse, delegate, and wrap results in the
//! common envelope; every business rule lives in `authhub-service`.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
