//! Role-gated extractors.
//!
//! Each wraps [`AuthUser`] and answers 403 when the caller's role falls
//! short of the gate. Role ordering lives in [`satisfies_role`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use buildboard_core::error::CoreError;
use buildboard_core::roles::{satisfies_role, ROLE_ADMIN, ROLE_BUILDER, ROLE_CONSUMER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Stamp out a tuple-struct extractor gated on a minimum role.
macro_rules! role_gate {
    ($(#[$doc:meta])* $name:ident, $required:expr, $denied:literal) => {
        $(#[$doc])*
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let user = AuthUser::from_request_parts(parts, state).await?;
                if !satisfies_role(&user.role, $required) {
                    tracing::debug!(
                        user_id = user.user_id,
                        role = %user.role,
                        required = $required,
                        "Role gate denied"
                    );
                    return Err(AppError::Core(CoreError::Forbidden($denied.into())));
                }
                Ok($name(user))
            }
        }
    };
}

role_gate!(
    /// Catalog, rule and account administration.
    RequireAdmin,
    ROLE_ADMIN,
    "Admin role required"
);

role_gate!(
    /// Submitting offers on build requests. Admins pass too.
    RequireBuilder,
    ROLE_BUILDER,
    "Builder role required"
);

role_gate!(
    /// Any signed-in account. Same as [`AuthUser`] but reads as a gate in
    /// handler signatures.
    RequireAuth,
    ROLE_CONSUMER,
    "Authentication required"
);
