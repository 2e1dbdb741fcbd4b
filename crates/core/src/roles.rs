//! Well-known role names and the checks built on them.
//!
//! These must match the `role` check constraint on the `users` table.

use crate::types::DbId;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_BUILDER: &str = "builder";
pub const ROLE_CONSUMER: &str = "consumer";

pub const ROLES: [&str; 3] = [ROLE_CONSUMER, ROLE_BUILDER, ROLE_ADMIN];

/// Role assigned to self-registered accounts.
pub const DEFAULT_ROLE: &str = ROLE_CONSUMER;

/// Whether a user holding `role` meets a `required` role.
///
/// Admins satisfy every requirement; builders satisfy builder and consumer
/// requirements.
pub fn satisfies_role(role: &str, required: &str) -> bool {
    match required {
        ROLE_ADMIN => role == ROLE_ADMIN,
        ROLE_BUILDER => role == ROLE_BUILDER || role == ROLE_ADMIN,
        _ => true,
    }
}

/// Owners and admins may modify a resource.
pub fn owns_or_admin(owner_id: DbId, user_id: DbId, role: &str) -> bool {
    owner_id == user_id || role == ROLE_ADMIN
}
