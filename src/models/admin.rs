use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Represents an admin account.
#[derive(FromRow, Clone, Debug)]
pub struct Admin {
    /// The unique identifier for the admin.
    pub id: Uuid,
    /// The admin's username.
    pub username: String,
    /// The admin's hashed password.
    pub password: String,
    /// The admin's email address.
    pub email: String,
    /// Role flag (admin vs standard account).
    pub is_admin: bool,
    /// Whether the account is active.
    pub is_active: bool,
    /// The timestamp when the account was created.
    pub created_at: DateTime<Utc>,
}

/// The public projection of an admin account, safe to put on the wire.
#[derive(Serialize, Clone, Debug)]
pub struct AdminInfo {
    /// The unique identifier for the admin.
    pub id: Uuid,
    /// The admin's username.
    pub username: String,
    /// The admin's email address.
    pub email: String,
}

impl From<Admin> for AdminInfo {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            email: admin.email,
        }
    }
}

/// The authenticated identity attached to a request by the auth
/// middleware.
#[derive(Clone, Copy, Debug)]
pub struct AdminId(pub Uuid);
