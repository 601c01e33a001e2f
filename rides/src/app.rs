use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Frame,
};
use rides_core::auth::{login, signup, Client};
use std::process::ExitCode;

/// Things that can happen to this app
mod action;
pub use action::Action;

/// Side effects, and how to run them
mod effect;
pub use effect::{Effect, EffectContext};

/// The login page itself
mod login_form;
use login_form::{LoginForm, Mode};

/// Blocking notices over the form
mod popover;
use popover::Popover;

/// Shown when login succeeds. Where the user goes from here is an open
/// question; for now the token in the store is the whole outcome.
const SUCCESS_MESSAGE: &str = "Login successful!";

/// Shown instead of submitting while a field is empty.
const REQUIRED_MESSAGE: &str = "Email and password are both required.";

/// The "functional core" of the app: handling an `Action` updates state
/// and returns the side effects to run, and nothing in here does IO.
pub struct App {
    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// The login form. It's the whole page.
    form: LoginForm,

    /// A notice or help screen over the form, swallowing input until
    /// dismissed
    popover: Option<Popover>,

    /// Auth client carrying the server URL and any saved token
    client: Client,

    /// Exit code to leave with, once the user asks to go
    exiting: Option<ExitCode>,
}

impl App {
    /// Create a new instance of the app.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            status_line: None,
            form: LoginForm::default(),
            popover: None,
            client,
            exiting: None,
        }
    }

    /// Produce any side effects needed to initialize the app. When a
    /// previous login is still on disk, check whether it's good.
    #[must_use]
    pub fn init(&self) -> Vec<Effect> {
        if self.client.auth.is_some() {
            vec![Effect::WhoAmI(self.client.clone())]
        } else {
            vec![]
        }
    }

    /// Render the app's UI to the screen.
    pub fn render(&self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        self.form
            .render(body_area, frame, self.popover.is_none());

        if let Some(popover) = &self.popover {
            popover.render(frame, body_area);
        }

        let status = Paragraph::new(match &self.status_line {
            Some(line) => line.as_str(),
            None => "tab: fields / enter: submit / F2: mode / F1: help / esc: quit",
        });

        frame.render_widget(status, status_area);
    }

    /// Handle an `Action`, updating the app's state and producing some
    /// side effect(s).
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => self.handle_key(key),

            Action::LoggedIn(token) => {
                self.client.auth = Some(token.clone());
                self.popover = Some(Popover::notice(SUCCESS_MESSAGE));

                vec![Effect::SaveToken(token)]
            }

            Action::SignedUp(message) => {
                self.popover = Some(Popover::notice(message));

                // The new account still has to log in.
                self.form.set_mode(Mode::Login);

                vec![]
            }

            Action::SavedToken => {
                self.status_line = Some("Login saved".to_owned());

                vec![]
            }

            Action::Rejected(message) => {
                self.popover = Some(Popover::notice(message));

                vec![]
            }

            Action::GotSession(session) => {
                self.status_line =
                    Some(format!("Logged in as {} ({})", session.email, session.role));

                vec![]
            }

            Action::Problem(message) => {
                self.popover = Some(Popover::notice(message));

                vec![]
            }
        }
    }

    /// The keyboard half of `handle`.
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return vec![];
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.exiting = Some(ExitCode::SUCCESS);
            return vec![];
        }

        // A popover swallows everything until it's dismissed.
        if self.popover.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.popover = None;
            }

            return vec![];
        }

        match key.code {
            KeyCode::Esc => {
                self.exiting = Some(ExitCode::SUCCESS);

                vec![]
            }
            KeyCode::F(1) => {
                self.popover = Some(Popover::Help);

                vec![]
            }
            KeyCode::F(2) => {
                self.form.toggle_mode();

                vec![]
            }
            KeyCode::Enter => self.submit(),
            _ => {
                self.form.handle_event(key);

                vec![]
            }
        }
    }

    /// Submit the form: one request, no retries, nothing stopping a
    /// second submit while the first is still in flight.
    fn submit(&mut self) -> Vec<Effect> {
        let entry = self.form.entry();

        // Both fields are required; don't bother the server otherwise.
        if entry.email.is_empty() || entry.password.is_empty() {
            self.popover = Some(Popover::notice(REQUIRED_MESSAGE));
            return vec![];
        }

        match self.form.mode() {
            Mode::Login => vec![Effect::LogIn(
                self.client.clone(),
                login::Req {
                    email: entry.email,
                    password: entry.password,
                },
            )],
            Mode::Signup => vec![Effect::SignUp(
                self.client.clone(),
                signup::Req {
                    email: entry.email,
                    password: entry.password,
                    role: None,
                },
            )],
        }
    }

    /// Let the TUI manager know whether we're all wrapped up and can
    /// exit.
    #[must_use]
    pub fn should_exit(&self) -> Option<ExitCode> {
        self.exiting
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rides_core::store::{MemoryStore, TokenStore};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app() -> App {
        App::new(Client::new("http://localhost:8080".to_string()))
    }

    fn key(code: KeyCode) -> Action {
        Action::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            let effects = app.handle(key(KeyCode::Char(c)));
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn typing_updates_the_email_field() {
        let mut app = app();

        type_str(&mut app, "a@b");

        assert_eq!(app.form.entry().email, "a@b");
        assert_eq!(app.form.entry().password, "");
    }

    #[test]
    fn tab_moves_typing_to_the_password_field() {
        let mut app = app();

        type_str(&mut app, "a@b");
        app.handle(key(KeyCode::Tab));
        type_str(&mut app, "pw");

        assert_eq!(app.form.entry().email, "a@b");
        assert_eq!(app.form.entry().password, "pw");
    }

    #[test]
    fn submitting_empty_fields_produces_no_network_effect() {
        let mut app = app();

        let effects = app.handle(key(KeyCode::Enter));

        assert!(effects.is_empty());
        assert_eq!(
            app.popover.as_ref().and_then(Popover::message),
            Some(REQUIRED_MESSAGE)
        );
    }

    #[test]
    fn submitting_with_only_an_email_produces_no_network_effect() {
        let mut app = app();

        type_str(&mut app, "a@b");

        assert!(app.handle(key(KeyCode::Enter)).is_empty());
    }

    #[test]
    fn submitting_the_filled_form_logs_in() {
        let mut app = app();

        type_str(&mut app, "a@b");
        app.handle(key(KeyCode::Tab));
        type_str(&mut app, "pw");

        let effects = app.handle(key(KeyCode::Enter));

        assert_eq!(effects.len(), 1);
        assert!(matches!(
            &effects[0],
            Effect::LogIn(_, req) if req.email == "a@b" && req.password == "pw"
        ));
    }

    #[test]
    fn f2_switches_submitting_to_signup() {
        let mut app = app();

        app.handle(key(KeyCode::F(2)));

        type_str(&mut app, "a@b");
        app.handle(key(KeyCode::Tab));
        type_str(&mut app, "pw");

        let effects = app.handle(key(KeyCode::Enter));

        assert!(matches!(&effects[0], Effect::SignUp(_, req) if req.email == "a@b"));
    }

    #[test]
    fn logging_in_saves_the_token_and_notifies_once() {
        let mut app = app();

        let effects = app.handle(Action::LoggedIn("abc123".to_string()));

        let save_effects = effects
            .iter()
            .filter(|effect| matches!(effect, Effect::SaveToken(token) if token == "abc123"))
            .count();
        assert_eq!(save_effects, 1);

        assert_eq!(
            app.popover.as_ref().and_then(Popover::message),
            Some(SUCCESS_MESSAGE)
        );
        assert_eq!(app.client.auth.as_deref(), Some("abc123"));
    }

    #[test]
    fn a_rejection_shows_the_server_message() {
        let mut app = app();

        let effects = app.handle(Action::Rejected("Invalid credentials".to_string()));

        assert!(effects.is_empty());
        assert_eq!(
            app.popover.as_ref().and_then(Popover::message),
            Some("Invalid credentials")
        );
    }

    #[test]
    fn a_problem_shows_whatever_text_it_carries() {
        let mut app = app();

        app.handle(Action::Problem(
            effect::GENERIC_PROBLEM_MESSAGE.to_string(),
        ));

        assert_eq!(
            app.popover.as_ref().and_then(Popover::message),
            Some(effect::GENERIC_PROBLEM_MESSAGE)
        );
    }

    #[test]
    fn a_notice_swallows_input_until_dismissed() {
        let mut app = app();

        app.handle(Action::Rejected("Invalid credentials".to_string()));

        // Typing while the notice is up changes nothing.
        type_str(&mut app, "x");
        assert_eq!(app.form.entry().email, "");
        assert!(app.popover.is_some());

        // Enter dismisses rather than submitting.
        let effects = app.handle(key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(app.popover.is_none());
    }

    #[test]
    fn signing_up_switches_back_to_login_mode() {
        let mut app = app();

        app.handle(key(KeyCode::F(2)));
        app.handle(Action::SignedUp("User created successfully".to_string()));

        assert_eq!(app.form.mode(), Mode::Login);
        assert_eq!(
            app.popover.as_ref().and_then(Popover::message),
            Some("User created successfully")
        );
    }

    #[test]
    fn a_session_report_lands_in_the_status_line() {
        let mut app = app();

        app.handle(Action::GotSession(rides_core::auth::me::Resp {
            email: "student@campus.edu".to_string(),
            role: "student".to_string(),
        }));

        assert_eq!(
            app.status_line.as_deref(),
            Some("Logged in as student@campus.edu (student)")
        );
    }

    #[test]
    fn init_checks_a_saved_login() {
        let with_token = App::new(Client::with_auth(
            "http://localhost:8080".to_string(),
            Some("abc123".to_string()),
        ));

        assert!(matches!(with_token.init().as_slice(), [Effect::WhoAmI(_)]));
        assert!(app().init().is_empty());
    }

    #[test]
    fn escape_exits() {
        let mut app = app();

        app.handle(key(KeyCode::Esc));

        assert!(app.should_exit().is_some());
    }

    #[test]
    fn ctrl_c_exits_even_under_a_notice() {
        let mut app = app();

        app.handle(Action::Rejected("Invalid credentials".to_string()));
        app.handle(Action::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));

        assert!(app.should_exit().is_some());
    }

    /// The whole success path: submit, log in, persist, notify.
    #[tokio::test]
    async fn a_successful_submission_ends_with_a_stored_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "token": "abc123" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::default());
        let context = EffectContext::new(store.clone());

        let mut app = App::new(Client::new(server.uri()));

        type_str(&mut app, "a@b");
        app.handle(key(KeyCode::Tab));
        type_str(&mut app, "pw");

        // Run the submission and feed every resulting action back in,
        // the way the event loop would.
        let mut effects = app.handle(key(KeyCode::Enter));
        while let Some(effect) = effects.pop() {
            if let Some(action) = effect.run(&context).await {
                effects.extend(app.handle(action));
            }
        }

        assert_eq!(
            store.get().expect("get should succeed"),
            Some("abc123".to_string())
        );
        assert_eq!(
            app.popover.as_ref().and_then(Popover::message),
            Some(SUCCESS_MESSAGE)
        );
    }
}
