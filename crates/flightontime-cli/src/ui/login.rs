use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flightontime_sdk::SdkError;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{centered_rect, text_width};
use crate::i18n::T;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoginFocus {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    InvalidCredentials,
    Failed,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Handled,
    Submit { email: String, password: String },
    Back,
}

#[derive(Debug, Default)]
pub struct LoginScreen {
    email: String,
    password: String,
    focus: LoginFocus,
    pending: bool,
    error: Option<LoginError>,
}

impl LoginScreen {
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<LoginError> {
        self.error
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LoginOutcome {
        match key.code {
            KeyCode::Esc => return LoginOutcome::Back,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    LoginFocus::Email => LoginFocus::Password,
                    LoginFocus::Password => LoginFocus::Email,
                };
            }
            KeyCode::Enter if !self.pending => {
                self.pending = true;
                self.error = None;
                return LoginOutcome::Submit {
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                };
            }
            KeyCode::Backspace => {
                self.buffer_mut().pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer_mut().push(c);
            }
            _ => {}
        }
        LoginOutcome::Handled
    }

    /// Record a failed attempt. The password is cleared.
    pub fn failed(&mut self, error: &SdkError) {
        self.pending = false;
        self.password.clear();
        self.error = Some(match error {
            SdkError::Auth(_) => LoginError::InvalidCredentials,
            _ => LoginError::Failed,
        });
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self.focus {
            LoginFocus::Email => &mut self.email,
            LoginFocus::Password => &mut self.password,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, t: &T) {
        let area = centered_rect(60, 60, area);
        f.render_widget(Clear, area);
        let block = Block::default().borders(Borders::ALL).title(t.login_title);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let masked = "•".repeat(self.password.chars().count());
        for (row, focus, title, value) in [
            (rows[0], LoginFocus::Email, t.email, self.email.as_str()),
            (rows[1], LoginFocus::Password, t.password, masked.as_str()),
        ] {
            let focused = self.focus == focus;
            let border = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let input = Paragraph::new(value)
                .block(Block::default().borders(Borders::ALL).border_style(border).title(title));
            f.render_widget(input, row);
            if focused && !self.pending {
                let x = row.x.saturating_add(1).saturating_add(text_width(value));
                f.set_cursor_position(Position::new(x.min(row.right().saturating_sub(2)), row.y + 1));
            }
        }

        let status = match (self.pending, self.error()) {
            (true, _) => Some(Span::styled(t.logging_in, Style::default().fg(Color::DarkGray))),
            (false, Some(LoginError::InvalidCredentials)) => {
                Some(Span::styled(t.invalid_credentials, Style::default().fg(Color::Red)))
            }
            (false, Some(LoginError::Failed)) => {
                Some(Span::styled(t.login_error, Style::default().fg(Color::Red)))
            }
            (false, None) => None,
        };
        if let Some(status) = status {
            f.render_widget(Paragraph::new(status), rows[2]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(s: &mut LoginScreen, code: KeyCode) -> LoginOutcome {
        s.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(s: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            press(s, KeyCode::Char(c));
        }
    }

    #[test]
    fn enter_submits_both_fields_once() {
        let mut s = LoginScreen::default();
        type_text(&mut s, " admin@flightontime.com ");
        press(&mut s, KeyCode::Tab);
        type_text(&mut s, "s3cret");

        assert_eq!(
            press(&mut s, KeyCode::Enter),
            LoginOutcome::Submit {
                email: "admin@flightontime.com".into(),
                password: "s3cret".into(),
            }
        );
        assert!(s.is_pending());
        assert_eq!(press(&mut s, KeyCode::Enter), LoginOutcome::Handled);
    }

    #[test]
    fn rejected_credentials_clear_password() {
        let mut s = LoginScreen::default();
        press(&mut s, KeyCode::Tab);
        type_text(&mut s, "wrong");
        press(&mut s, KeyCode::Enter);

        s.failed(&SdkError::Auth("401".into()));
        assert!(!s.is_pending());
        assert_eq!(s.error(), Some(LoginError::InvalidCredentials));
        assert!(s.password.is_empty());

        s.failed(&SdkError::Status { status: 502, body: String::new() });
        assert_eq!(s.error(), Some(LoginError::Failed));
    }

    #[test]
    fn escape_goes_back() {
        let mut s = LoginScreen::default();
        assert_eq!(press(&mut s, KeyCode::Esc), LoginOutcome::Back);
    }
}
