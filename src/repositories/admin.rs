use sqlx::PgPool;
use uuid::Uuid;
use crate::{error::Result, models::admin::Admin};

/// Looks up an active admin account by username.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `username` - The username to look up.
///
/// # Returns
///
/// A `Result` containing an `Option<Admin>`.
pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<Admin>> {
    let admin = sqlx::query_as::<_, Admin>(
        r#"
        SELECT id, username, password, email, is_admin, is_active, created_at
        FROM admins
        WHERE username = $1 AND is_active = true
        "#,
    )
    .bind(username)
    .fetch_optional(db)
    .await?;

    Ok(admin)
}

/// Looks up an admin account by id.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `id` - The admin's id.
///
/// # Returns
///
/// A `Result` containing an `Option<Admin>`.
pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Admin>> {
    let admin = sqlx::query_as::<_, Admin>(
        r#"
        SELECT id, username, password, email, is_admin, is_active, created_at
        FROM admins
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(admin)
}
