//! HTTP API for the BuildBoard PC-build marketplace.
//!
//! The binary in `main.rs` and the integration tests both assemble the app
//! through [`router::build_app_router`].

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
