use crate::role::Role;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, RequestPartsExt};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Claims carried inside issued tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Email of the account the token was issued to.
    pub sub: String,

    /// Role the account held at issuance.
    pub role: Role,

    /// When the token was issued (seconds since the epoch).
    pub iat: i64,

    /// When the token stops being valid (seconds since the epoch).
    pub exp: i64,
}

impl Claims {
    /// Issue a signed token for an account. Tokens are valid for an hour
    /// from issuance.
    ///
    /// ## Errors
    ///
    /// Fails when signing does, e.g. with an unusable key.
    pub fn issue(
        email: &str,
        role: Role,
        key: &EncodingKey,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();

        let claims = Self {
            sub: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };

        encode(&Header::default(), &claims, key)
    }
}

impl<S> FromRequestParts<S> for Claims
where
    DecodingKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AuthError::InvalidToken)?;

        let token_data = decode::<Claims>(
            bearer.token(),
            &DecodingKey::from_ref(state),
            &Validation::default(),
        )
        .map_err(|err| {
            tracing::trace!(?err, "error decoding token");
            AuthError::InvalidToken
        })?;

        Ok(token_data.claims)
    }
}

/// Rejection for requests that need a valid bearer token and don't have
/// one.
#[derive(Debug)]
pub enum AuthError {
    /// The header was missing or malformed, or the token didn't validate
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
        };
        let body = Json(json!({
            "message": message,
        }));
        (status, body).into_response()
    }
}
