use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bostarter_core::DomainError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`DomainError`] for funding-engine errors and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from the funding engine.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request carried no usable actor identity.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- DomainError variants ---
            AppError::Domain(domain) => match domain {
                DomainError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", domain.to_string())
                }
                DomainError::InvalidAmount
                | DomainError::AmountBelowRewardThreshold { .. }
                | DomainError::InvalidReward
                | DomainError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", domain.to_string())
                }
                DomainError::ProjectNotAcceptingFunds
                | DomainError::RewardExhausted
                | DomainError::InvalidTransition { .. }
                | DomainError::Conflict(_) => {
                    (StatusCode::CONFLICT, "CONFLICT", domain.to_string())
                }
                // Surfaces only once the ledger's bounded retries are spent.
                DomainError::ConcurrencyConflict => {
                    (StatusCode::CONFLICT, "CONFLICT", domain.to_string())
                }
                DomainError::SelfFundingForbidden | DomainError::Forbidden(_) => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", domain.to_string())
                }
                DomainError::Persistence(source) => {
                    tracing::error!(error = %source, "Persistence failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
