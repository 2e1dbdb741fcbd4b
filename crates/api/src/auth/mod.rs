//! Credentials: Argon2id password hashes and HS256 session tokens.

pub mod jwt;
pub mod password;
