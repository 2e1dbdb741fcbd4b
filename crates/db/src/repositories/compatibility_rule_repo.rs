//! Repository for the `compatibility_rules` table.

use sqlx::{PgConnection, PgPool};
use buildboard_core::types::DbId;

use crate::models::compatibility_rule::{
    CompatibilityRuleRow, CreateCompatibilityRule, UpdateCompatibilityRule,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, rule_number, name, description, severity, rule_config, \
    message_template, is_active, created_at, updated_at";

/// Provides CRUD operations for compatibility rules.
pub struct CompatibilityRuleRepo;

impl CompatibilityRuleRepo {
    /// List all rules, active or not, ordered by rule number.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<CompatibilityRuleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM compatibility_rules ORDER BY rule_number");
        sqlx::query_as::<_, CompatibilityRuleRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Load the active rule set in evaluation order.
    pub async fn list_active(
        conn: &mut PgConnection,
    ) -> Result<Vec<CompatibilityRuleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM compatibility_rules WHERE is_active = true ORDER BY rule_number"
        );
        sqlx::query_as::<_, CompatibilityRuleRow>(&query)
            .fetch_all(conn)
            .await
    }

    /// Find a rule by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CompatibilityRuleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM compatibility_rules WHERE id = $1");
        sqlx::query_as::<_, CompatibilityRuleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new rule.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCompatibilityRule,
    ) -> Result<CompatibilityRuleRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO compatibility_rules
                (rule_number, name, description, severity, rule_config, message_template, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CompatibilityRuleRow>(&query)
            .bind(input.rule_number)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.severity)
            .bind(&input.rule_config)
            .bind(&input.message_template)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Update a rule. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCompatibilityRule,
    ) -> Result<Option<CompatibilityRuleRow>, sqlx::Error> {
        let query = format!(
            "UPDATE compatibility_rules SET
                is_active = COALESCE($2, is_active),
                severity = COALESCE($3, severity),
                rule_config = COALESCE($4, rule_config),
                message_template = COALESCE($5, message_template)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CompatibilityRuleRow>(&query)
            .bind(id)
            .bind(input.is_active)
            .bind(&input.severity)
            .bind(&input.rule_config)
            .bind(&input.message_template)
            .fetch_optional(pool)
            .await
    }

    /// Delete a rule. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM compatibility_rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
