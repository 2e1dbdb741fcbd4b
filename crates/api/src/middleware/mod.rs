//! Request extractors for identity and authorization.

pub mod auth;
pub mod rbac;
