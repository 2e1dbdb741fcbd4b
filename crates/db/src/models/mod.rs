//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where
//!   the entity supports them

pub mod application;
pub mod build;
pub mod builder_profile;
pub mod category;
pub mod comment;
pub mod compatibility_rule;
pub mod like;
pub mod offer;
pub mod part;
pub mod rating;
pub mod request;
pub mod stats;
pub mod user;
