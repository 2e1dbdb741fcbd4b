//! BuildBoard domain logic.
//!
//! Pure types and rules with no database or HTTP dependencies: the
//! compatibility engine, build slot requirements, roles, marketplace
//! statuses, and input validation helpers.

pub mod build_slots;
pub mod compatibility;
pub mod error;
pub mod marketplace;
pub mod roles;
pub mod types;
