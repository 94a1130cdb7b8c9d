//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access/refresh token generation and validation.
//! - [`limiter`] -- per-account login throttling.

pub mod jwt;
pub mod limiter;
pub mod password;
