//! Handlers for the `/users` resource: profiles, the builder directory and
//! admin account controls (ban, role).

use axum::extract::{Path, State};
use axum::Json;
use buildboard_core::error::CoreError;
use buildboard_core::marketplace::validate_one_of;
use buildboard_core::roles::ROLES;
use buildboard_core::types::DbId;
use buildboard_db::models::builder_profile::{BuilderProfile, UpdateBuilderProfile};
use buildboard_db::models::user::{BuilderSummary, UpdateProfile, User, UserResponse};
use buildboard_db::repositories::{BuilderProfileRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

fn profile_not_found(user_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "BuilderProfile",
        id: user_id,
    })
}

/// Request body for `PUT /users/{id}/ban`.
#[derive(Debug, Deserialize)]
pub struct BanRequest {
    pub is_banned: bool,
}

/// Request body for `PUT /users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: String,
}

/// Admins cannot lock themselves out.
fn ensure_not_self(admin: &AuthUser, target: DbId, action: &str) -> AppResult<()> {
    if admin.user_id == target {
        return Err(AppError::BadRequest(format!("Admins cannot {action} themselves")));
    }
    Ok(())
}

fn respond(user: User) -> Json<DataResponse<UserResponse>> {
    Json(DataResponse { data: user.into() })
}

/// GET /api/v1/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/users/builders
pub async fn list_builders(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BuilderSummary>>>> {
    let builders = UserRepo::list_builders(&state.pool).await?;
    Ok(Json(DataResponse { data: builders }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(respond(user))
}

/// PUT /api/v1/users/{id}
///
/// Owner or admin. Role and ban state are not editable here.
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    auth.ensure_owner_or_admin(id)?;
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }
    if let Some(name) = input.display_name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Display name cannot be empty".into(),
            )));
        }
    }

    let user = UserRepo::update_profile(&state.pool, id, &input)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(respond(user))
}

/// PUT /api/v1/users/{id}/ban
///
/// A banned user can no longer log in. Tokens already issued stay valid
/// until they expire.
pub async fn set_banned(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<BanRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    ensure_not_self(&admin, id, "ban")?;
    let user = UserRepo::set_banned(&state.pool, id, input.is_banned)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    tracing::info!(user_id = id, admin_id = admin.user_id, is_banned = input.is_banned, "User ban state changed");
    Ok(respond(user))
}

/// PUT /api/v1/users/{id}/role
///
/// The new role takes effect at the user's next login.
pub async fn set_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RoleRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    validate_one_of(&input.role, &ROLES, "role")?;
    ensure_not_self(&admin, id, "change the role of")?;
    let user = UserRepo::set_role(&state.pool, id, &input.role)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    tracing::info!(user_id = id, admin_id = admin.user_id, role = %user.role, "User role changed");
    Ok(respond(user))
}

/// GET /api/v1/users/{id}/builder-profile
pub async fn get_builder_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BuilderProfile>>> {
    let profile = BuilderProfileRepo::find_by_user(&state.pool, id)
        .await?
        .ok_or_else(|| profile_not_found(id))?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/users/{id}/builder-profile
///
/// Owner or admin. Profiles are created by application approval, never
/// here.
pub async fn update_builder_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBuilderProfile>,
) -> AppResult<Json<DataResponse<BuilderProfile>>> {
    auth.ensure_owner_or_admin(id)?;
    if input.business_name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "business_name cannot be empty".into(),
        )));
    }
    let profile = BuilderProfileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| profile_not_found(id))?;
    Ok(Json(DataResponse { data: profile }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn admin_cannot_target_themselves() {
        let admin = AuthUser { user_id: 1, role: "admin".into() };
        assert_matches!(
            ensure_not_self(&admin, 1, "ban"),
            Err(AppError::BadRequest(msg)) if msg == "Admins cannot ban themselves"
        );
        assert!(ensure_not_self(&admin, 2, "ban").is_ok());
    }
}
