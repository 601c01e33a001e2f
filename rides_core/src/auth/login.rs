use serde::{Deserialize, Serialize};

/// The request to log into the server.
#[derive(Debug, Serialize, Deserialize)]
pub struct Req {
    /// Email the account was created with.
    pub email: String,

    /// Plaintext password. Only ever sent in the request body.
    pub password: String,
}

/// Result of logging in.
#[derive(Debug, Serialize, Deserialize)]
pub struct Resp {
    /// Token to persist and present on future requests. The server sends
    /// more fields alongside it, but this is the only one we keep.
    pub token: String,
}

/// Where the login endpoint lives.
pub const PATH: &str = "/api/auth/login";
