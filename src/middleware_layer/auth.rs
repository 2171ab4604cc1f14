use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::{
    error::AppError,
    models::admin::AdminId,
    state::AppState,
};

/// Extracts the bearer token from the `Authorization` header.
///
/// # Arguments
///
/// * `headers` - The request headers.
///
/// # Returns
///
/// An `Option` containing the token if found.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

/// A middleware that requires a valid bearer token to be present.
///
/// The resolved admin id is attached to the request's extensions for
/// downstream handlers. Both a missing header and a failed verification
/// collapse to 401, differing only in message.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// A `Response` or an `AppError`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    tracing::debug!("🔐 Checking authentication...");

    let token = extract_bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("❌ No bearer token in Authorization header");
        AppError::Authentication("Authorization required".to_string())
    })?;

    let admin_id = state.token_keys.verify(token)?;

    tracing::debug!("✅ Admin authenticated: {}", admin_id);

    request.extensions_mut().insert(AdminId(admin_id));

    Ok(next.run(request).await)
}
