//! Accounts: consumers, builders and admins.

use sqlx::{PgConnection, PgPool};
use buildboard_core::roles::{ROLE_ADMIN, ROLE_BUILDER, ROLE_CONSUMER};
use buildboard_core::types::DbId;

use crate::models::user::{BuilderSummary, CreateUser, UpdateProfile, User};

const COLUMNS: &str = "id, email, password_hash, display_name, avatar_url, bio, role, \
                        is_banned, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// A taken email fails on `uq_users_email`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, display_name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.display_name)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exact match; callers normalize the address first.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Every account, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Accounts that can take offers (builders and admins), by name.
    /// Banned accounts are left out.
    pub async fn list_builders(pool: &PgPool) -> Result<Vec<BuilderSummary>, sqlx::Error> {
        sqlx::query_as::<_, BuilderSummary>(
            "SELECT id, display_name, avatar_url, role FROM users
             WHERE role IN ($1, $2) AND NOT is_banned
             ORDER BY display_name, id",
        )
        .bind(ROLE_BUILDER)
        .bind(ROLE_ADMIN)
        .fetch_all(pool)
        .await
    }

    /// Apply the non-`None` profile fields.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                display_name = COALESCE($2, display_name),
                avatar_url = COALESCE($3, avatar_url),
                bio = COALESCE($4, bio)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.display_name)
            .bind(&input.avatar_url)
            .bind(&input.bio)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_banned(
        pool: &PgPool,
        id: DbId,
        is_banned: bool,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET is_banned = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(is_banned)
            .fetch_optional(pool)
            .await
    }

    /// An unknown role fails on `ck_users_role`.
    pub async fn set_role(pool: &PgPool, id: DbId, role: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET role = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Raise a consumer to builder inside the caller's transaction.
    /// Builders and admins keep their role.
    pub async fn promote_to_builder(conn: &mut PgConnection, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET role = $2 WHERE id = $1 AND role = $3")
            .bind(id)
            .bind(ROLE_BUILDER)
            .bind(ROLE_CONSUMER)
            .execute(conn)
            .await?;
        Ok(())
    }
}
