use serde::{Deserialize, Serialize};

/// The request to create a new account.
#[derive(Debug, Serialize, Deserialize)]
pub struct Req {
    /// Email to use for contact and login.
    pub email: String,

    /// Plaintext password for the new account.
    pub password: String,

    /// Kind of account to create (`student` or `driver`). The server
    /// defaults to `student` when this is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Result of creating an account.
#[derive(Debug, Serialize, Deserialize)]
pub struct Resp {
    /// Confirmation text to show the user.
    pub message: String,

    /// Role the account was created with.
    pub role: String,
}

/// Where the signup endpoint lives.
pub const PATH: &str = "/api/auth/signup";
