//! Module domain entities.

pub mod model;

pub use model::{CreateModule, Module, Route, UpdateModule};
