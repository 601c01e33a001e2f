use crate::jwt::Claims;
use crate::role::Role;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Resp {
    email: String,
    role: Role,
}

#[tracing::instrument]
pub async fn handler(claims: Claims) -> Json<Resp> {
    Json(Resp {
        email: claims.sub,
        role: claims.role,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn echoes_the_token_identity() {
        let claims = Claims {
            sub: "student@campus.edu".to_string(),
            role: Role::Driver,
            iat: 0,
            exp: 1,
        };

        let Json(resp) = handler(claims).await;

        assert_eq!(
            resp,
            Resp {
                email: "student@campus.edu".to_string(),
                role: Role::Driver,
            }
        );
    }
}
