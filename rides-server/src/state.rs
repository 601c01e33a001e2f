use axum::extract::FromRef;
use jsonwebtoken::{errors::Error, DecodingKey, EncodingKey};
use sqlx::{Pool, Postgres};

/// Shared state needed by requests. `FromRef` lets handlers pull out just
/// the piece they need (the pool for `Conn`, the keys for tokens).
#[derive(Clone, FromRef)]
pub struct AppState {
    /// Database connection pool.
    pool: Pool<Postgres>,

    /// Key for signing new tokens.
    encoding_key: EncodingKey,

    /// Key for verifying presented tokens.
    decoding_key: DecodingKey,
}

impl AppState {
    /// Create a new state from a pool and the configured signing secret.
    ///
    /// ## Errors
    ///
    /// Fails when the secret isn't valid base64.
    pub fn new(pool: Pool<Postgres>, jwt_base64_secret: &str) -> Result<Self, Error> {
        Ok(Self {
            pool,
            encoding_key: EncodingKey::from_base64_secret(jwt_base64_secret)?,
            decoding_key: DecodingKey::from_base64_secret(jwt_base64_secret)?,
        })
    }
}
