use serde::{Deserialize, Serialize};

/// Who the server thinks the presented token belongs to.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resp {
    /// Email of the logged-in account.
    pub email: String,

    /// Role of the logged-in account.
    pub role: String,
}

/// Where the session-introspection endpoint lives.
pub const PATH: &str = "/api/auth/me";
