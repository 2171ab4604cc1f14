use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// The payload carried by every issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The admin id the token authenticates.
    pub sub: String,
    /// Issued-at timestamp (unix seconds).
    pub iat: i64,
    /// Expiration timestamp (unix seconds).
    pub exp: i64,
}

/// Signing and verification keys, derived once at startup from the
/// configured secret. Tokens are self-contained; expiry is the only
/// invalidation mechanism.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    /// Derives the HS256 key pair from the shared secret.
    ///
    /// # Arguments
    ///
    /// * `secret` - The symmetric signing secret.
    /// * `ttl_days` - Token lifetime in days.
    pub fn new(secret: &[u8], ttl_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Issues a signed token naming the given admin.
    ///
    /// # Arguments
    ///
    /// * `admin_id` - The authenticated admin's id.
    ///
    /// # Returns
    ///
    /// A `Result` containing the encoded token.
    pub fn issue(&self, admin_id: Uuid) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
    }

    /// Validates signature and expiry, returning the admin id the token
    /// names. Fails with `InvalidToken` on bad signature, malformed
    /// structure, expiry, or a non-UUID identity claim.
    pub fn verify(&self, token: &str) -> Result<Uuid> {
        // Expiry is exact: no clock leeway is granted.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| AppError::InvalidToken(e.to_string()))?;

        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::InvalidToken("malformed identity claim".to_string()))
    }
}
