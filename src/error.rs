use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// An authentication error (missing header or bad credentials).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A bearer token that failed signature, structure or expiry checks.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// A resource not found error.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A multipart error.
    #[error("Multipart error: {0}")]
    Multipart(String),

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // 5xx responses expose the underlying failure in an `error` field;
        // client errors carry only the message.
        let (status, message, detail) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                    Some(e.to_string()),
                )
            }

            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "File system error".to_string(),
                    Some(e.to_string()),
                )
            }

            AppError::Migration(ref e) => {
                tracing::error!("Migration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Migration error".to_string(),
                    Some(e.to_string()),
                )
            }

            AppError::Authentication(ref msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                (StatusCode::UNAUTHORIZED, msg.clone(), None)
            }

            AppError::InvalidToken(ref msg) => {
                tracing::warn!("Token rejected: {}", msg);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string(), None)
            }

            AppError::NotFound(what) => {
                tracing::debug!("{} not found", what);
                (StatusCode::NOT_FOUND, format!("{what} not found"), None)
            }

            AppError::Validation(ref msg) => {
                tracing::debug!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone(), None)
            }

            AppError::Multipart(ref msg) => {
                tracing::debug!("Multipart error: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone(), None)
            }

            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(msg.clone()),
                )
            }
        };

        let body = match detail {
            Some(detail) => sonic_rs::to_string(&sonic_rs::json!({
                "message": message,
                "error": detail,
            })),
            None => sonic_rs::to_string(&sonic_rs::json!({
                "message": message,
            })),
        }
        .unwrap_or_else(|_| r#"{"message":"Internal server error"}"#.to_string());

        (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}
