//! Password hashing and temporary secret generation.

pub mod generator;
pub mod hasher;

pub use generator::TempPasswordGenerator;
pub use hasher::PasswordHasher;
