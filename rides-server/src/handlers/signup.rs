use crate::bail_if;
use crate::conn::Conn;
use crate::error::Error;
use crate::role::Role;
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::Acquire;

#[derive(Debug, Deserialize)]
pub struct Req {
    email: String,
    password: String,
    /// Defaults to `student` when the client doesn't say.
    #[serde(default)]
    role: Option<Role>,
}

#[derive(Debug, Serialize)]
pub struct Resp {
    message: String,
    role: Role,
}

#[tracing::instrument(skip(req))]
pub async fn handler(Conn(mut conn): Conn, Json(req): Json<Req>) -> Result<Json<Resp>, Error> {
    let mut tx = conn.begin().await?;

    // Validation: don't allow a duplicate account if one exists.
    let existing = sqlx::query("SELECT id FROM accounts WHERE email = $1 LIMIT 1")
        .bind(&req.email)
        .fetch_optional(&mut *tx)
        .await?;

    bail_if!(existing.is_some(), "User already exists");

    let role = req.role.unwrap_or(Role::Student);

    // We're good, so create the account.
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)?
        .to_string();

    sqlx::query("INSERT INTO accounts (email, password, role) VALUES ($1, $2, $3)")
        .bind(&req.email)
        .bind(hash)
        .bind(role.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(email = %req.email, ?role, "created account");

    Ok(Json(Resp {
        message: "User created successfully".to_string(),
        role,
    }))
}
