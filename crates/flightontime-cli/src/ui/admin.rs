use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::i18n::T;

/// Only reachable with a session; the app re-checks the gate before drawing.
pub fn render(f: &mut Frame, area: Rect, t: &T, api_url: &str) {
    let label = Style::default().add_modifier(Modifier::DIM);
    let body = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("{}: ", t.api_url), label),
            Span::raw(api_url.to_string()),
        ]),
        Line::from(Span::styled(
            t.session_active,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title(t.admin_title));
    f.render_widget(body, area);
}
