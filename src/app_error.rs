use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use diesel::result::DatabaseErrorKind;
use diesel_async::pooled_connection::bb8::RunError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

pub type DieselError = diesel::result::Error;

/// Failures reported by the repositories.
///
/// A missing row is not a failure: single-record lookups return `None`.
#[derive(Error, Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum StoreError {
    #[error("constraint violation: {message}")]
    ConstraintViolation {
        message: String,
        constraint: Option<String>,
    },

    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    #[error("query failed: {message}")]
    QueryFailure { message: String },
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => StoreError::ConstraintViolation {
                message: info.message().to_string(),
                constraint: info.constraint_name().map(str::to_owned),
            },
            other => StoreError::QueryFailure {
                message: other.to_string(),
            },
        }
    }
}

impl From<RunError> for StoreError {
    fn from(err: RunError) -> Self {
        StoreError::Unavailable {
            message: err.to_string(),
        }
    }
}

/// Errors returned by route handlers.
///
/// Each variant carries the failure contract of the routes that use it, so the
/// status codes differ between route groups.
#[derive(Error, Debug)]
pub enum AppError {
    /// 500 with `{"message": ...}`.
    #[error("{message}")]
    Lookup {
        message: &'static str,
        #[source]
        source: StoreError,
    },

    /// 500 with `{"error": ...}`.
    #[error("order could not be placed: {0}")]
    OrderRejected(#[source] StoreError),

    /// 200 with the store error itself as the body. Category browsing has
    /// always answered this way and clients read the body shape instead of
    /// the status.
    #[error("{0}")]
    Legacy(StoreError),
}

impl AppError {
    pub fn lookup(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Lookup { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Lookup { message, source } => {
                tracing::error!(error = %source, "{message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": message })),
                )
                    .into_response()
            }
            AppError::OrderRejected(source) => {
                tracing::error!(error = %source, "Failed to place order");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": source })),
                )
                    .into_response()
            }
            AppError::Legacy(source) => {
                tracing::error!(error = %source, "Category lookup failed");
                (StatusCode::OK, Json(source)).into_response()
            }
        }
    }
}
