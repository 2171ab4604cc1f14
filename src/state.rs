use sqlx::PgPool;

use crate::auth::token::TokenKeys;
use crate::config::Config;
use crate::error::Result;

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: PgPool,
    /// The application's configuration.
    pub config: Config,
    /// The bearer token signing and verification keys.
    pub token_keys: TokenKeys,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = crate::db::create_pool(&config.database_url).await?;
        tracing::info!("✅ PostgreSQL pool initialized");

        let token_keys = TokenKeys::new(config.jwt_secret.as_bytes(), config.token_ttl_days);
        tracing::info!("✅ Token keys derived");

        Ok(AppState {
            db,
            config: config.clone(),
            token_keys,
        })
    }
}
