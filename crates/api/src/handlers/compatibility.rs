//! Handlers for the `/compatibility` resource.
//!
//! Provides the compatibility check used by the build editor and by build
//! saves, plus administrator CRUD over the rule set.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use buildboard_core::compatibility::rules::RULE_TYPES;
use buildboard_core::compatibility::selection::{assemble_selection, selected_part_ids};
use buildboard_core::compatibility::{
    evaluate_rules, CompatibilityIssue, CompatibilityRule, PartSlots, RuleConfig, SelectedPart,
    Severity,
};
use buildboard_core::error::CoreError;
use buildboard_core::types::DbId;
use buildboard_db::models::compatibility_rule::{
    CompatibilityRuleRow, CreateCompatibilityRule, UpdateCompatibilityRule,
};
use buildboard_db::repositories::{CompatibilityRuleRepo, PartRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /compatibility/check`.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub parts: Option<PartSlots>,
}

/// Result of a compatibility check.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub issues: Vec<CompatibilityIssue>,
}

/// Load the selected parts and the active rule set through `conn`, then
/// evaluate.
///
/// Takes a connection rather than the pool so a build save can run the check
/// inside its own transaction.
pub(crate) async fn run_compatibility_check(
    conn: &mut PgConnection,
    slots: &PartSlots,
) -> Result<Vec<CompatibilityIssue>, sqlx::Error> {
    let ids = selected_part_ids(slots);
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let catalog: Vec<SelectedPart> = PartRepo::find_spec_rows(&mut *conn, &ids)
        .await?
        .into_iter()
        .map(SelectedPart::from)
        .collect();
    let rules: Vec<CompatibilityRule> = CompatibilityRuleRepo::list_active(&mut *conn)
        .await?
        .iter()
        .map(CompatibilityRuleRow::to_engine_rule)
        .collect();

    let selected = assemble_selection(slots, &catalog);
    let issues = evaluate_rules(&rules, &selected);
    tracing::debug!(
        parts = selected.len(),
        rules = rules.len(),
        issues = issues.len(),
        "Compatibility check evaluated"
    );
    Ok(issues)
}

/// POST /api/v1/compatibility/check
///
/// Evaluate the active rules against `{ "parts": { slot: part_id | null } }`.
pub async fn check(
    State(state): State<AppState>,
    Json(input): Json<CheckRequest>,
) -> AppResult<Json<DataResponse<CheckResponse>>> {
    let slots = input
        .parts
        .ok_or_else(|| AppError::BadRequest("parts object required".into()))?;

    let mut conn = state.pool.acquire().await?;
    let issues = run_compatibility_check(&mut conn, &slots).await?;
    Ok(Json(DataResponse {
        data: CheckResponse { issues },
    }))
}

/// GET /api/v1/compatibility/rule-types
pub async fn list_rule_types() -> Json<DataResponse<[&'static str; 6]>> {
    Json(DataResponse { data: RULE_TYPES })
}

// ---------------------------------------------------------------------------
// Rule CRUD (admin)
// ---------------------------------------------------------------------------

fn rule_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "CompatibilityRule",
        id,
    })
}

fn validate_severity(severity: &str) -> AppResult<()> {
    if Severity::parse(severity).is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "severity must be 'error' or 'warning'".into(),
        )));
    }
    Ok(())
}

/// Stored configs the engine cannot interpret are accepted but never fire.
fn warn_if_unrecognized(rule_number: i32, config: &serde_json::Value) {
    if !RuleConfig::parse(config).is_recognized() {
        tracing::warn!(
            rule_number,
            "Compatibility rule config has an unrecognized type and will be skipped"
        );
    }
}

/// GET /api/v1/compatibility/rules
pub async fn list_rules(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CompatibilityRuleRow>>>> {
    let rules = CompatibilityRuleRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: rules }))
}

/// GET /api/v1/compatibility/rules/{id}
pub async fn get_rule(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CompatibilityRuleRow>>> {
    let rule = CompatibilityRuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| rule_not_found(id))?;
    Ok(Json(DataResponse { data: rule }))
}

/// POST /api/v1/compatibility/rules
///
/// Duplicate rule numbers are rejected with 409.
pub async fn create_rule(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCompatibilityRule>,
) -> AppResult<(StatusCode, Json<DataResponse<CompatibilityRuleRow>>)> {
    validate_severity(&input.severity)?;
    if input.name.trim().is_empty() || input.message_template.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and message_template are required".into(),
        ));
    }
    warn_if_unrecognized(input.rule_number, &input.rule_config);

    let rule = CompatibilityRuleRepo::create(&state.pool, &input).await?;
    tracing::info!(rule_id = rule.id, rule_number = rule.rule_number, "Compatibility rule created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: rule })))
}

/// PUT /api/v1/compatibility/rules/{id}
///
/// Partial update of `is_active`, `severity`, `rule_config` and
/// `message_template`. An empty body is rejected.
pub async fn update_rule(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCompatibilityRule>,
) -> AppResult<Json<DataResponse<CompatibilityRuleRow>>> {
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }
    if let Some(severity) = &input.severity {
        validate_severity(severity)?;
    }

    let rule = CompatibilityRuleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| rule_not_found(id))?;
    if input.rule_config.is_some() {
        warn_if_unrecognized(rule.rule_number, &rule.rule_config);
    }
    Ok(Json(DataResponse { data: rule }))
}

/// DELETE /api/v1/compatibility/rules/{id}
pub async fn delete_rule(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CompatibilityRuleRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(rule_not_found(id))
    }
}
