use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{
    error::{AppError, Result},
    state::AppState,
};

/// Describes the API surface at the root path.
#[axum::debug_handler]
pub async fn api_index() -> Result<Response> {
    let body = sonic_rs::to_string(&sonic_rs::json!({
        "message": "Mobilya E-Commerce API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth",
            "categories": "/api/categories",
            "products": "/api/products",
            "upload": "/api/upload"
        }
    }))
    .map_err(|e| AppError::Internal(format!("Response serialization failed: {}", e)))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// Reports process and database health. Always 200; a broken database
/// connection shows up in the `database` field instead.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Result<Response> {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
    {
        Ok(_) => "Connected",
        Err(e) => {
            tracing::warn!("❌ Health check database probe failed: {}", e);
            "Disconnected"
        }
    };

    let body = sonic_rs::to_string(&sonic_rs::json!({
        "status": "OK",
        "message": "Server is running",
        "environment": state.config.app_env.as_str(),
        "database": database,
        "timestamp": Utc::now().to_rfc3339()
    }))
    .map_err(|e| AppError::Internal(format!("Response serialization failed: {}", e)))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// JSON fallback for every unmatched route.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"message":"Route not found"}"#,
    )
        .into_response()
}
