//! Handlers for the `/applications` resource: consumers applying to become
//! builders and admins reviewing them.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use buildboard_core::error::CoreError;
use buildboard_core::marketplace::{
    validate_one_of, APPLICATION_DECISIONS, APPLICATION_STATUS_PENDING, APPLICATION_TYPES,
};
use buildboard_core::roles::ROLE_CONSUMER;
use buildboard_core::types::DbId;
use buildboard_db::models::application::{
    ApplicationFilter, ApplicationWithUser, BuilderApplication, CreateApplication,
    ReviewApplication,
};
use buildboard_db::repositories::ApplicationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn application_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "BuilderApplication",
        id,
    })
}

fn already_reviewed(id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Application {id} has already been reviewed"
    )))
}

/// Normalize and check a submission, returning its application type.
fn validate_submission(input: &mut CreateApplication) -> Result<String, CoreError> {
    input.business_name = input.business_name.trim().to_string();
    if input.business_name.is_empty() {
        return Err(CoreError::Validation("business_name is required".into()));
    }
    if input.years_of_experience.is_some_and(|years| years < 0) {
        return Err(CoreError::Validation(
            "years_of_experience cannot be negative".into(),
        ));
    }
    let application_type = input
        .application_type
        .take()
        .unwrap_or_else(|| APPLICATION_TYPES[0].to_string());
    validate_one_of(&application_type, &APPLICATION_TYPES, "application_type")?;
    Ok(application_type)
}

/// GET /api/v1/applications?status=&user_id=
pub async fn list_applications(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<ApplicationFilter>,
) -> AppResult<Json<DataResponse<Vec<ApplicationWithUser>>>> {
    let applications = ApplicationRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// GET /api/v1/applications/mine
pub async fn my_applications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ApplicationWithUser>>>> {
    let filter = ApplicationFilter {
        status: None,
        user_id: Some(auth.user_id),
    };
    let applications = ApplicationRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// POST /api/v1/applications
///
/// Consumers only; one pending application at a time (409 otherwise).
pub async fn create_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreateApplication>,
) -> AppResult<(StatusCode, Json<DataResponse<BuilderApplication>>)> {
    if auth.role != ROLE_CONSUMER {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Account already has the {} role",
            auth.role
        ))));
    }
    let application_type = validate_submission(&mut input)?;

    let application =
        ApplicationRepo::create(&state.pool, auth.user_id, &application_type, &input).await?;
    tracing::info!(application_id = application.id, user_id = auth.user_id, "Builder application submitted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: application })))
}

/// PUT /api/v1/applications/{id}/review
///
/// Approve or reject a pending application. Approval promotes the
/// applicant to `builder`, effective at their next login.
pub async fn review_application(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewApplication>,
) -> AppResult<Json<DataResponse<BuilderApplication>>> {
    validate_one_of(&input.status, &APPLICATION_DECISIONS, "status")?;

    let existing = ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| application_not_found(id))?;
    if existing.status != APPLICATION_STATUS_PENDING {
        return Err(already_reviewed(id));
    }

    let application = ApplicationRepo::review(&state.pool, id, admin.user_id, &input)
        .await?
        .ok_or_else(|| already_reviewed(id))?;
    tracing::info!(
        application_id = id,
        user_id = application.user_id,
        admin_id = admin.user_id,
        status = %application.status,
        "Builder application reviewed"
    );
    Ok(Json(DataResponse { data: application }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn submission(business_name: &str) -> CreateApplication {
        CreateApplication {
            business_name: business_name.into(),
            registration_number: None,
            address: None,
            website: None,
            portfolio_url: None,
            years_of_experience: None,
            specialization: None,
            application_type: None,
        }
    }

    #[test]
    fn type_defaults_to_individual() {
        let mut input = submission("  Rig Works ");
        assert_eq!(validate_submission(&mut input).unwrap(), "individual");
        assert_eq!(input.business_name, "Rig Works");
    }

    #[test]
    fn blank_name_and_unknown_type_rejected() {
        assert_matches!(
            validate_submission(&mut submission("   ")),
            Err(CoreError::Validation(_))
        );
        let mut input = submission("Rig Works");
        input.application_type = Some("franchise".into());
        assert_matches!(validate_submission(&mut input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn negative_experience_rejected() {
        let mut input = submission("Rig Works");
        input.years_of_experience = Some(-1);
        assert_matches!(validate_submission(&mut input), Err(CoreError::Validation(_)));
    }
}
