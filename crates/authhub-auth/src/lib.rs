//! # authhub-auth
//!
//! Pure authentication and authorization primitives: Argon2id password
//! hashing, temporary password generation, JWT issuance/validation with a
//! flattened user snapshot, and the permission decision engine.
//!
//! Everything in this crate is a pure function over its inputs (plus the
//! OS RNG for salts and temporary secrets) and safe to share across
//! arbitrarily many concurrent callers without locking.

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, TempPasswordGenerator};
pub use rbac::{Authorizable, can_perform};
