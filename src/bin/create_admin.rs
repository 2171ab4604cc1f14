//! Bootstraps the first admin account.
//!
//! ```bash
//! cargo run --bin create_admin
//! ```
//!
//! Credentials come from `ADMIN_USERNAME`, `ADMIN_PASSWORD` and
//! `ADMIN_EMAIL`, with development defaults when unset.

use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@mobilya.com".to_string());

    tracing::info!("Connecting to PostgreSQL...");
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM admins WHERE username = $1")
        .bind(&username)
        .fetch_optional(&pool)
        .await?;

    if existing.is_some() {
        tracing::warn!("❌ Admin already exists: {}", username);
        return Ok(());
    }

    let hashed = bcrypt::hash(&password, 10).context("Failed to hash password")?;

    let admin_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO admins (id, username, password, email)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(admin_id)
    .bind(&username)
    .bind(&hashed)
    .bind(&email)
    .execute(&pool)
    .await?;

    tracing::info!("✅ Admin created: {}", admin_id);
    tracing::info!("  Username: {}", username);
    tracing::info!("  Password: {}", password);
    tracing::info!("  Email: {}", email);
    tracing::warn!("⚠️  Change this password after the first login");

    Ok(())
}
