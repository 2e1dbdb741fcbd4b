//! Handler error type and its JSON rendering.
//!
//! Every failure body has `error` (human-readable) and `code` (stable,
//! machine-readable). Build rejections add `issues` or `missing_parts`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use buildboard_core::compatibility::CompatibilityIssue;
use buildboard_core::error::CoreError;
use serde_json::{json, Map, Value};

const GENERIC_INTERNAL: &str = "An internal error occurred";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The part selection has at least one `error`-severity issue.
    #[error("Build has compatibility errors")]
    Incompatible(Vec<CompatibilityIssue>),

    /// Required build slots are empty.
    #[error("Missing required parts: {}", .0.join(", "))]
    MissingParts(Vec<String>),

    /// Logged in full; the client only sees a generic message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Status, code, message and any extra body fields for one error.
struct Rendered {
    status: StatusCode,
    code: &'static str,
    message: String,
    extra: Option<(&'static str, Value)>,
}

impl Rendered {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            extra: None,
        }
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", GENERIC_INTERNAL)
    }

    fn with(mut self, key: &'static str, value: Value) -> Self {
        self.extra = Some((key, value));
        self
    }
}

impl AppError {
    fn render(&self) -> Rendered {
        match self {
            AppError::Core(core) => render_core(core),
            AppError::Database(err) => render_sqlx(err),
            AppError::BadRequest(msg) => Rendered::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::Incompatible(issues) => {
                Rendered::new(StatusCode::BAD_REQUEST, "COMPATIBILITY_ERROR", self.to_string())
                    .with("issues", json!(issues))
            }
            AppError::MissingParts(slots) => {
                Rendered::new(StatusCode::BAD_REQUEST, "MISSING_PARTS", self.to_string())
                    .with("missing_parts", json!(slots))
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                Rendered::internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let rendered = self.render();
        let mut body = Map::new();
        body.insert("error".into(), Value::String(rendered.message));
        body.insert("code".into(), Value::String(rendered.code.into()));
        if let Some((key, value)) = rendered.extra {
            body.insert(key.into(), value);
        }
        (rendered.status, Json(Value::Object(body))).into_response()
    }
}

fn render_core(err: &CoreError) -> Rendered {
    match err {
        CoreError::NotFound { entity, id } => Rendered::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => {
            Rendered::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
        }
        CoreError::Conflict(msg) => Rendered::new(StatusCode::CONFLICT, "CONFLICT", msg),
        CoreError::Unauthorized(msg) => {
            Rendered::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
        }
        CoreError::Forbidden(msg) => Rendered::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg),
    }
}

/// Map database failures by SQLSTATE.
///
/// `RowNotFound` is 404, a unique violation on a `uq_*` constraint is 409,
/// a foreign key violation is 400. Anything else is logged and hidden
/// behind a 500.
fn render_sqlx(err: &sqlx::Error) -> Rendered {
    match err {
        sqlx::Error::RowNotFound => {
            Rendered::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") if constraint.starts_with("uq_") => Rendered::new(
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                ),
                Some("23503") => Rendered::new(
                    StatusCode::BAD_REQUEST,
                    "BAD_REQUEST",
                    "Referenced resource not found",
                ),
                _ => {
                    tracing::error!(error = %db_err, constraint, "Database error");
                    Rendered::internal()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            Rendered::internal()
        }
    }
}
