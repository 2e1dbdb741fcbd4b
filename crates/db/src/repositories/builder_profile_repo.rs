//! Repository for the `builder_profiles` table.

use sqlx::{PgConnection, PgPool};
use buildboard_core::types::DbId;

use crate::models::application::BuilderApplication;
use crate::models::builder_profile::{BuilderProfile, UpdateBuilderProfile};

const COLUMNS: &str = "user_id, business_name, registration_number, address, website, \
    portfolio_url, years_of_experience, specialization, created_at, updated_at";

pub struct BuilderProfileRepo;

impl BuilderProfileRepo {
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<BuilderProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM builder_profiles WHERE user_id = $1");
        sqlx::query_as::<_, BuilderProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Seed a profile from an approved application. An existing profile
    /// is left untouched.
    pub async fn create_from_application(
        conn: &mut PgConnection,
        application: &BuilderApplication,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO builder_profiles
                (user_id, business_name, registration_number, address, website,
                 portfolio_url, years_of_experience, specialization)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(application.user_id)
        .bind(&application.business_name)
        .bind(&application.registration_number)
        .bind(&application.address)
        .bind(&application.website)
        .bind(&application.portfolio_url)
        .bind(application.years_of_experience)
        .bind(&application.specialization)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateBuilderProfile,
    ) -> Result<Option<BuilderProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE builder_profiles SET
                business_name = COALESCE($2, business_name),
                registration_number = COALESCE($3, registration_number),
                address = COALESCE($4, address),
                website = COALESCE($5, website),
                portfolio_url = COALESCE($6, portfolio_url),
                years_of_experience = COALESCE($7, years_of_experience),
                specialization = COALESCE($8, specialization)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BuilderProfile>(&query)
            .bind(user_id)
            .bind(&input.business_name)
            .bind(&input.registration_number)
            .bind(&input.address)
            .bind(&input.website)
            .bind(&input.portfolio_url)
            .bind(input.years_of_experience)
            .bind(&input.specialization)
            .fetch_optional(pool)
            .await
    }
}
