use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    extract::AppJson,
    models::admin::{AdminId, AdminInfo},
    services::auth as auth_service,
    state::AppState,
};

/// The request payload for admin login.
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The response payload for a successful login.
#[derive(Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub admin: AdminInfo,
}

/// The response payload for a token check.
#[derive(Serialize)]
pub struct VerifyResponse {
    pub admin: AdminInfo,
}

/// Handles admin login: checks the credentials and issues a bearer
/// token. Any credential failure yields 401 and no token.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Response> {
    tracing::info!("🔐 Login attempt: {}", payload.username);

    let admin =
        auth_service::authenticate_admin(&state, &payload.username, &payload.password).await?;
    let token = state.token_keys.issue(admin.id)?;

    tracing::info!("✅ Token issued for admin: {}", admin.id);

    let response = LoginResponse {
        message: "Login successful",
        token,
        admin: AdminInfo::from(admin),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Returns the account behind a valid bearer token. 404 when the token
/// verifies but the account has since been removed.
#[axum::debug_handler]
pub async fn verify(
    State(state): State<AppState>,
    Extension(AdminId(admin_id)): Extension<AdminId>,
) -> Result<Response> {
    let admin = auth_service::find_admin(&state, admin_id)
        .await?
        .ok_or(AppError::NotFound("Admin"))?;

    let response = VerifyResponse {
        admin: AdminInfo::from(admin),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}
