use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Row, Table, Wrap},
    Frame,
};

/// Something shown over the form. Input is swallowed until the user
/// dismisses it with enter or escape.
#[derive(Debug)]
pub enum Popover {
    /// A message the user must acknowledge before continuing
    Notice(String),

    /// A table of keyboard shortcuts
    Help,
}

impl Popover {
    /// Notice constructor that takes anything stringy.
    pub fn notice(message: impl Into<String>) -> Self {
        Self::Notice(message.into())
    }

    /// The displayed text, for notices.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Notice(message) => Some(message),
            Self::Help => None,
        }
    }

    /// Render centered over the form.
    pub fn render(&self, frame: &mut Frame<'_>, body_area: Rect) {
        match self {
            Popover::Notice(message) => {
                let popup_vert = Layout::vertical([Constraint::Length(5)]).flex(Flex::Center);
                let popup_horiz =
                    Layout::horizontal([Constraint::Percentage(60)]).flex(Flex::Center);

                let [popup_area] = popup_vert.areas(body_area);
                let [popup_area] = popup_horiz.areas(popup_area);

                let popup = Paragraph::new(message.as_str())
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("Notice")
                            .padding(Padding::horizontal(1))
                            .border_style(Style::new().blue()),
                    );

                frame.render_widget(Clear, popup_area);
                frame.render_widget(popup, popup_area);
            }
            Popover::Help => {
                let popup_vert = Layout::vertical([Constraint::Length(9)]).flex(Flex::Center);
                let popup_horiz =
                    Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

                let [popup_area] = popup_vert.areas(body_area);
                let [popup_area] = popup_horiz.areas(popup_area);

                let popup = Table::new(
                    [
                        Row::new(vec!["F1", "Display this help"]),
                        Row::new(vec!["tab / shift-tab", "Move between fields"]),
                        Row::new(vec!["enter", "Submit the form"]),
                        Row::new(vec!["F2", "Switch between log in and sign up"]),
                        Row::new(vec!["esc", "Quit (or close this help)"]),
                    ],
                    [Constraint::Max(16), Constraint::Fill(1)],
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Keyboard Shortcuts")
                        .padding(Padding::horizontal(1))
                        .border_style(Style::new().blue()),
                );

                frame.render_widget(Clear, popup_area);
                frame.render_widget(popup, popup_area);
            }
        }
    }
}
