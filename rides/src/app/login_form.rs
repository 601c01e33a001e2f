use crate::form_fields;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

/// What submitting the form does right now. The fields stay the same
/// either way; only the endpoint changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Log into an existing account
    Login,

    /// Create a new account
    Signup,
}

/// The login page: two fields and a submit.
#[derive(Debug)]
pub struct LoginForm {
    /// Whether submitting logs in or signs up
    mode: Mode,

    /// Which field we're editing
    active: Field,

    /// Email the account was created with
    email: Input,

    /// Account password (rendered masked)
    password: Input,
}

form_fields!(Field, Email, Password);

/// The values entered into the form
#[derive(Debug)]
pub struct Entry {
    /// Whatever's in the email field
    pub email: String,

    /// Whatever's in the password field
    pub password: String,
}

impl LoginForm {
    /// Render the form centered in `body_area`. The cursor only shows
    /// while the form actually has focus (i.e. no notice is covering it.)
    #[expect(clippy::cast_possible_truncation)]
    pub fn render(&self, body_area: Rect, frame: &mut Frame<'_>, focused: bool) {
        let popup_vert = Layout::vertical([Constraint::Length(8)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

        let [form_area] = popup_vert.areas(body_area);
        let [form_area] = popup_horiz.areas(form_area);
        frame.render_widget(Clear, form_area);

        let width = form_area.width.saturating_sub(2 + 1); // -2 for the border, -1 for the cursor

        let rows = Layout::vertical(Constraint::from_lengths([2, 3, 3]));
        let [prompt_area, email_area, password_area] = rows.areas(form_area);

        let prompt = Paragraph::new(vec![
            Line::from(self.title()).bold(),
            Line::from(self.prompt()),
        ]);
        frame.render_widget(prompt, prompt_area);

        let active_style = Style::default().fg(Color::Blue);

        // EMAIL
        {
            let scroll = self.email.visual_scroll(width as usize);

            let field = Paragraph::new(self.email.value())
                .scroll((0, scroll as u16))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Email")
                        .border_style(match self.active {
                            Field::Email => active_style,
                            Field::Password => Style::default(),
                        }),
                );

            frame.render_widget(field, email_area);

            if focused && matches!(self.active, Field::Email) {
                frame.set_cursor_position((
                    email_area.x
                        + (self.email.visual_cursor().max(scroll) - scroll) as u16 // current end of text
                        + 1, // just past the end of the text
                    email_area.y + 1, // +1 row for the border/title
                ));
            }
        }

        // PASSWORD
        {
            let scroll = self.password.visual_scroll(width as usize);

            let field = Paragraph::new("*".repeat(self.password.value().len()))
                .scroll((0, scroll as u16))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Password")
                        .border_style(match self.active {
                            Field::Password => active_style,
                            Field::Email => Style::default(),
                        }),
                );

            frame.render_widget(field, password_area);

            if focused && matches!(self.active, Field::Password) {
                frame.set_cursor_position((
                    password_area.x
                        + (self.password.visual_cursor().max(scroll) - scroll) as u16
                        + 1,
                    password_area.y + 1,
                ));
            }
        }
    }

    /// Route a key press: tab moves focus, everything else edits the
    /// active field. Every keystroke lands in the field immediately; the
    /// next render shows it.
    pub fn handle_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.active = self.active.next();
            }
            KeyCode::BackTab => {
                self.active = self.active.prev();
            }
            _ => {
                let event = Event::Key(key);

                match self.active {
                    Field::Email => self.email.handle_event(&event),
                    Field::Password => self.password.handle_event(&event),
                };
            }
        }
    }

    /// The current field values.
    #[must_use]
    pub fn entry(&self) -> Entry {
        Entry {
            email: self.email.to_string(),
            password: self.password.to_string(),
        }
    }

    /// What submitting currently does.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch between logging in and signing up.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Login => Mode::Signup,
            Mode::Signup => Mode::Login,
        };
    }

    /// Jump to a specific mode (e.g. back to login after an account is
    /// created.)
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Heading above the fields.
    fn title(&self) -> &'static str {
        match self.mode {
            Mode::Login => "Log In",
            Mode::Signup => "Create Account",
        }
    }

    /// One-line instruction under the heading.
    fn prompt(&self) -> &'static str {
        match self.mode {
            Mode::Login => "Please enter your credentials to log in.",
            Mode::Signup => "Pick an email and password for the new account.",
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            mode: Mode::Login,
            active: Field::Email,
            email: Input::new(String::new()),
            password: Input::new(String::new()),
        }
    }
}
