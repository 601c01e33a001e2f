use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Shown when the server rejects a request without saying why.
pub const FALLBACK_MESSAGE: &str = "Login failed";

/// Errors that can happen while calling the auth API
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The request itself failed: connection refused, DNS, or a body that
    /// wasn't the JSON we expected.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status. Displays as the
    /// server's `message` field, or a fixed fallback when the body had
    /// none.
    #[error("{}", .message.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    Rejected {
        /// What the server said went wrong, if it said anything
        message: Option<String>,
    },
}

impl Error {
    /// Whether the server answered and said no, as opposed to the request
    /// failing in transit. Rejections are shown to the user verbatim;
    /// everything else collapses to a generic notice.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejection_displays_server_message() {
        let err = Error::Rejected {
            message: Some("Invalid credentials".to_string()),
        };

        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn rejection_without_message_falls_back() {
        let err = Error::Rejected { message: None };

        assert_eq!(err.to_string(), "Login failed");
    }
}
