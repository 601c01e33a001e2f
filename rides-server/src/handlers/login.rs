use crate::bail;
use crate::conn::Conn;
use crate::error::Error;
use crate::jwt::Claims;
use crate::role::Role;
use argon2::{password_hash, Argon2, PasswordHash, PasswordVerifier};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use jsonwebtoken::EncodingKey;
use serde::{Deserialize, Serialize};

/// This should be the same for both missing accounts and incorrect
/// passwords so as not to give additional information about what accounts
/// exist to someone probing the system.
static BAD_LOGIN_MESSAGE: &str = "Invalid credentials";

#[derive(Debug, Deserialize)]
pub struct Req {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
pub struct Resp {
    token: String,
    email: String,
    role: Role,
}

#[derive(Debug, sqlx::FromRow)]
struct Account {
    email: String,
    password: String,
    role: String,
}

#[tracing::instrument(skip(req, encoding_key))]
pub async fn handler(
    Conn(mut conn): Conn,
    State(encoding_key): State<EncodingKey>,
    Json(req): Json<Req>,
) -> Result<Json<Resp>, Error> {
    let account: Option<Account> =
        sqlx::query_as("SELECT email, password, role FROM accounts WHERE email = $1 LIMIT 1")
            .bind(&req.email)
            .fetch_optional(&mut *conn)
            .await?;

    let Some(account) = account else {
        bail!(BAD_LOGIN_MESSAGE, StatusCode::UNAUTHORIZED)
    };

    let hash = PasswordHash::new(&account.password)?;

    if let Err(err) = Argon2::default().verify_password(req.password.as_bytes(), &hash) {
        if err == password_hash::Error::Password {
            bail!(BAD_LOGIN_MESSAGE, StatusCode::UNAUTHORIZED)
        }

        tracing::error!(?err, "error verifying password");
        return Err(Error::Internal);
    }

    let Some(role) = Role::from_db(&account.role) else {
        tracing::error!(role = %account.role, "unknown role in database");
        return Err(Error::Internal);
    };

    let token = Claims::issue(&account.email, role, &encoding_key)?;

    tracing::debug!(email = %account.email, "login succeeded");

    Ok(Json(Resp {
        token,
        email: account.email,
        role,
    }))
}
