use super::error::{self, Error};
use super::{login, me, signup};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

/// Client for the auth API
#[derive(Debug, Clone)]
pub struct Client {
    /// The server to connect to. Should only be the protocol and host,
    /// e.g. `http://localhost:8080`.
    pub server: String,

    /// Token presented on authenticated requests. Set by logging in, or by
    /// reading a previous login back from the store.
    pub auth: Option<String>,
}

impl Client {
    /// Construct a client with no saved login.
    #[must_use]
    pub fn new(server: String) -> Self {
        Self { server, auth: None }
    }

    /// Construct a client that already holds a token.
    #[must_use]
    pub fn with_auth(server: String, auth: Option<String>) -> Self {
        Self { server, auth }
    }

    /// Log into an existing account. Exactly one request per call; the
    /// caller decides whether to try again.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn login(
        &self,
        http: &reqwest::Client,
        req: &login::Req,
    ) -> error::Result<login::Resp> {
        let url = Url::parse(&self.server)?.join(login::PATH)?;

        Self::handle_response(http.post(url).json(req)).await
    }

    /// Create a new account.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn signup(
        &self,
        http: &reqwest::Client,
        req: &signup::Req,
    ) -> error::Result<signup::Resp> {
        let url = Url::parse(&self.server)?.join(signup::PATH)?;

        Self::handle_response(http.post(url).json(req)).await
    }

    /// Ask the server who the held token belongs to. Fails locally,
    /// without a request, when no token is held.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn me(&self, http: &reqwest::Client) -> error::Result<me::Resp> {
        let url = Url::parse(&self.server)?.join(me::PATH)?;

        self.authenticated(|token| http.get(url).bearer_auth(token))
            .await
    }

    /// Run a request that needs the saved token attached.
    async fn authenticated<CB, T>(&self, cb: CB) -> error::Result<T>
    where
        CB: FnOnce(&str) -> reqwest::RequestBuilder,
        T: DeserializeOwned,
    {
        match &self.auth {
            Some(token) => Self::handle_response(cb(token)).await,
            None => Err(Error::Rejected {
                message: Some("Not logged in".to_string()),
            }),
        }
    }

    /// Convert an HTTP response into a result, interpreting errors in a
    /// standard way.
    ///
    /// ## Errors
    ///
    /// - `Ok(..)` if the server returned a success (2xx), with the body
    ///   parsed as JSON
    /// - `Error::Rejected` on any other status, carrying whatever
    ///   `message` the body had
    /// - `Error::Http` when the request fails in transit or either body
    ///   isn't the JSON we expect
    async fn handle_response<T>(req: reqwest::RequestBuilder) -> error::Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = req.send().await?;

        let status = resp.status();

        if status.is_success() {
            Ok(resp.json().await?)
        } else {
            let rejection: Rejection = resp.json().await?;
            Err(Error::Rejected {
                message: rejection.message,
            })
        }
    }
}

/// What the server sends when it turns a request down.
#[derive(Debug, Deserialize)]
struct Rejection {
    /// Human-readable explanation, shown to the user verbatim
    message: Option<String>,
}
