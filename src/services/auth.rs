use uuid::Uuid;
use crate::{
    auth::password,
    error::{AppError, Result},
    models::admin::Admin,
    repositories::admin as admin_repo,
    state::AppState,
};

/// Authenticates an admin by credentials.
///
/// Unknown usernames and wrong passwords fail with the same message so
/// the response does not reveal which accounts exist.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `username` - The admin's username.
/// * `plaintext` - The admin's plaintext password.
///
/// # Returns
///
/// A `Result` containing the authenticated `Admin`.
pub async fn authenticate_admin(
    state: &AppState,
    username: &str,
    plaintext: &str,
) -> Result<Admin> {
    tracing::debug!("🔐 Authenticating admin: {}", username);

    let admin = admin_repo::find_by_username(&state.db, username)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

    if !password::verify_password(plaintext, &admin.password)? {
        return Err(AppError::Authentication(
            "Invalid username or password".to_string(),
        ));
    }

    tracing::info!("✅ Admin authenticated: {}", admin.id);

    Ok(admin)
}

/// Looks up an admin account by id.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `admin_id` - The admin's id.
///
/// # Returns
///
/// A `Result` containing an `Option<Admin>`.
pub async fn find_admin(state: &AppState, admin_id: Uuid) -> Result<Option<Admin>> {
    admin_repo::find_by_id(&state.db, admin_id).await
}
