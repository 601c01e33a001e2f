use super::Action;
use rides_core::auth::{self, login, signup, Client};
use rides_core::store::{self, TokenStore};
use std::sync::Arc;

/// What the user sees when a request fails for any reason other than the
/// server saying no. The real error only goes to the log.
pub const GENERIC_PROBLEM_MESSAGE: &str = "Something went wrong. Please try again.";

/// Connections to external services that effects use. We keep these
/// around to have some level of connection sharing for the app as a
/// whole.
pub struct EffectContext {
    /// An HTTP client with reqwest
    http: reqwest::Client,

    /// Durable storage for the login token
    store: Arc<dyn TokenStore + Send + Sync>,
}

impl EffectContext {
    /// Get a new `EffectContext` writing tokens to the given store.
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore + Send + Sync>) -> Self {
        Self {
            http: reqwest::Client::new(),
            store,
        }
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug)]
pub enum Effect {
    /// Log in with the entered credentials
    LogIn(Client, login::Req),

    /// Create a new account with the entered credentials
    SignUp(Client, signup::Req),

    /// Persist the token from a successful login
    SaveToken(String),

    /// Check who the saved token belongs to
    WhoAmI(Client),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the
    /// next `Action` the application needs to handle. A rejection comes
    /// back with the server's words; anything else is logged here and
    /// comes back as the generic notice.
    pub async fn run(self, context: &EffectContext) -> Option<Action> {
        match self.run_inner(context).await {
            Ok(action) => action,
            Err(Problem::Server(err)) if err.is_rejection() => {
                Some(Action::Rejected(err.to_string()))
            }
            Err(problem) => {
                tracing::error!(?problem, "problem running effect");
                Some(Action::Problem(GENERIC_PROBLEM_MESSAGE.to_string()))
            }
        }
    }

    /// The actual implementation of `run`, but with a `Result` wrapper to
    /// make it more ergonomic to write.
    async fn run_inner(self, context: &EffectContext) -> Result<Option<Action>, Problem> {
        match self {
            Self::LogIn(client, req) => {
                tracing::info!("logging in");

                let resp = client.login(&context.http, &req).await?;

                Ok(Some(Action::LoggedIn(resp.token)))
            }

            Self::SignUp(client, req) => {
                tracing::info!("signing up");

                let resp = client.signup(&context.http, &req).await?;

                Ok(Some(Action::SignedUp(resp.message)))
            }

            Self::SaveToken(token) => {
                tracing::info!("saving token");

                context.store.set(&token)?;

                Ok(Some(Action::SavedToken))
            }

            Self::WhoAmI(client) => {
                tracing::debug!("checking the saved login");

                // A stale or revoked token isn't worth a notice; the form
                // is right there either way.
                match client.me(&context.http).await {
                    Ok(resp) => Ok(Some(Action::GotSession(resp))),
                    Err(err) => {
                        tracing::debug!(?err, "the saved token didn't check out");
                        Ok(None)
                    }
                }
            }
        }
    }
}

/// Problems that can happen while running an `Effect`.
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    /// We couldn't read or write the token store.
    #[error("store error: {0}")]
    Store(#[from] store::Error),

    /// We had a problem talking to the server, or the server said no.
    #[error("problem communicating with the server: {0}")]
    Server(#[from] auth::Error),
}

#[cfg(test)]
mod test {
    use super::*;
    use rides_core::store::MemoryStore;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context() -> (Arc<MemoryStore>, EffectContext) {
        let store = Arc::new(MemoryStore::default());
        let context = EffectContext::new(store.clone());

        (store, context)
    }

    fn login_req() -> login::Req {
        login::Req {
            email: "student@campus.edu".to_string(),
            password: "letmein".to_string(),
        }
    }

    #[tokio::test]
    async fn successful_login_comes_back_as_logged_in() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "token": "abc123" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (_, context) = context();
        let effect = Effect::LogIn(Client::new(server.uri()), login_req());

        let action = effect.run(&context).await;

        assert!(matches!(action, Some(Action::LoggedIn(token)) if token == "abc123"));
    }

    #[tokio::test]
    async fn rejected_login_carries_the_server_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "message": "Invalid credentials" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (store, context) = context();
        let effect = Effect::LogIn(Client::new(server.uri()), login_req());

        let action = effect.run(&context).await;

        assert!(matches!(action, Some(Action::Rejected(message)) if message == "Invalid credentials"));

        // A rejected login must never touch the store.
        assert_eq!(store.get().expect("get should succeed"), None);
    }

    #[tokio::test]
    async fn rejection_without_a_message_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let (_, context) = context();
        let effect = Effect::LogIn(Client::new(server.uri()), login_req());

        let action = effect.run(&context).await;

        assert!(matches!(action, Some(Action::Rejected(message)) if message == "Login failed"));
    }

    #[tokio::test]
    async fn transport_failure_becomes_the_generic_notice() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<!doctype html>"))
            .expect(1)
            .mount(&server)
            .await;

        let (_, context) = context();
        let effect = Effect::LogIn(Client::new(server.uri()), login_req());

        let action = effect.run(&context).await;

        assert!(
            matches!(action, Some(Action::Problem(message)) if message == GENERIC_PROBLEM_MESSAGE)
        );
    }

    #[tokio::test]
    async fn save_token_writes_through_the_store() {
        let (store, context) = context();

        let action = Effect::SaveToken("abc123".to_string()).run(&context).await;

        assert!(matches!(action, Some(Action::SavedToken)));
        assert_eq!(
            store.get().expect("get should succeed"),
            Some("abc123".to_string())
        );
    }

    #[tokio::test]
    async fn whoami_failures_stay_quiet() {
        // No token held, so the client fails locally; the user shouldn't
        // hear about it.
        let (_, context) = context();

        let action = Effect::WhoAmI(Client::new("http://localhost:8080".to_string()))
            .run(&context)
            .await;

        assert!(action.is_none());
    }

    #[tokio::test]
    async fn signup_confirmation_comes_back_as_signed_up() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "User created successfully",
                "role": "student",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (_, context) = context();
        let effect = Effect::SignUp(
            Client::new(server.uri()),
            signup::Req {
                email: "new@campus.edu".to_string(),
                password: "hunter2".to_string(),
                role: None,
            },
        );

        let action = effect.run(&context).await;

        assert!(
            matches!(action, Some(Action::SignedUp(message)) if message == "User created successfully")
        );
    }
}
