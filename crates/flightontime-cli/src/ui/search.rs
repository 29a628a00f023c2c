use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flightontime_sdk::{
    match_airports, match_carriers, Dropdown, Field, PendingQuery, QueryOrchestrator,
    ReferenceData,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use tracing::debug;

use super::{card, text_width};
use crate::i18n::T;
use crate::router::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input(Field),
    Submit,
}

const FOCUS_ORDER: [Focus; 5] = [
    Focus::Input(Field::Carrier),
    Focus::Input(Field::Origin),
    Focus::Input(Field::Destination),
    Focus::Input(Field::Departure),
    Focus::Submit,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Written into the field when picked.
    pub value: String,
    pub label: String,
}

#[derive(Debug)]
pub enum SearchOutcome {
    Handled,
    Submitted(PendingQuery),
    Navigate(View),
    ToggleLocale,
    Quit,
}

/// Screen regions from the last render, for mouse hit-testing.
#[derive(Debug, Default)]
struct HitAreas {
    inputs: Vec<(Focus, Rect)>,
    /// Open list, its area and the scroll offset ratatui rendered it at.
    list: Option<(Field, Rect, usize)>,
}

pub struct SearchScreen {
    query: QueryOrchestrator,
    reference: ReferenceData,
    focus: Focus,
    carrier_list: Dropdown,
    origin_list: Dropdown,
    destination_list: Dropdown,
    highlighted: Option<usize>,
    hits: HitAreas,
}

impl SearchScreen {
    pub fn new(query: QueryOrchestrator, reference: ReferenceData) -> Self {
        let mut screen = Self {
            query,
            reference,
            focus: FOCUS_ORDER[0],
            carrier_list: Dropdown::default(),
            origin_list: Dropdown::default(),
            destination_list: Dropdown::default(),
            highlighted: None,
            hits: HitAreas::default(),
        };
        screen.carrier_list.on_focus();
        screen
    }

    pub fn query(&self) -> &QueryOrchestrator {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut QueryOrchestrator {
        &mut self.query
    }

    pub fn set_reference(&mut self, reference: ReferenceData) {
        self.reference = reference;
    }

    pub fn unmount(&mut self) {
        self.query.unmount();
    }

    pub fn tick(&mut self, now: Instant) {
        for field in [Field::Carrier, Field::Origin, Field::Destination] {
            if let Some(list) = self.dropdown_mut(field) {
                if list.tick(now) {
                    debug!(?field, "suggestion list hidden");
                }
            }
        }
        if self.visible_list().is_none() {
            self.highlighted = None;
        }
    }

    // ------------------------------------------------------------------
    // Suggestions
    // ------------------------------------------------------------------

    pub fn suggestions(&self, field: Field) -> Vec<Suggestion> {
        let typed = self.query.form().get(field);
        match field {
            Field::Carrier => match_carriers(typed, &self.reference.carriers)
                .into_iter()
                .map(|c| Suggestion {
                    value: c.name.clone(),
                    label: c.name.clone(),
                })
                .collect(),
            Field::Origin | Field::Destination => match_airports(typed, &self.reference.airports)
                .into_iter()
                .map(|a| Suggestion {
                    value: a.iata_code.clone(),
                    label: format!("{}  {}", a.iata_code, a.full_name),
                })
                .collect(),
            Field::Departure => Vec::new(),
        }
    }

    fn dropdown(&self, field: Field) -> Option<&Dropdown> {
        match field {
            Field::Carrier => Some(&self.carrier_list),
            Field::Origin => Some(&self.origin_list),
            Field::Destination => Some(&self.destination_list),
            Field::Departure => None,
        }
    }

    fn dropdown_mut(&mut self, field: Field) -> Option<&mut Dropdown> {
        match field {
            Field::Carrier => Some(&mut self.carrier_list),
            Field::Origin => Some(&mut self.origin_list),
            Field::Destination => Some(&mut self.destination_list),
            Field::Departure => None,
        }
    }

    /// The list currently shown, if any. The focused field wins over a list
    /// still waiting out its blur delay.
    pub fn visible_list(&self) -> Option<(Field, Vec<Suggestion>)> {
        let focused = match self.focus {
            Focus::Input(field) => Some(field),
            Focus::Submit => None,
        };
        focused
            .into_iter()
            .chain([Field::Carrier, Field::Origin, Field::Destination])
            .filter(|field| self.dropdown(*field).is_some_and(Dropdown::is_open))
            .map(|field| (field, self.suggestions(field)))
            .find(|(_, suggestions)| !suggestions.is_empty())
    }

    fn select(&mut self, field: Field, index: usize) {
        let Some(picked) = self.suggestions(field).into_iter().nth(index) else {
            return;
        };
        debug!(?field, value = %picked.value, "suggestion picked");
        self.query.set_field(field, &picked.value);
        if let Some(list) = self.dropdown_mut(field) {
            list.on_select();
        }
        self.highlighted = None;
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    fn move_focus(&mut self, to: Focus, now: Instant) {
        if to == self.focus {
            return;
        }
        if let Focus::Input(field) = self.focus {
            if let Some(list) = self.dropdown_mut(field) {
                list.on_blur(now);
            }
        }
        if let Focus::Input(field) = to {
            if let Some(list) = self.dropdown_mut(field) {
                list.on_focus();
            }
        }
        self.focus = to;
        self.highlighted = None;
    }

    fn step_focus(&mut self, forward: bool, now: Instant) {
        let len = FOCUS_ORDER.len();
        let current = FOCUS_ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.move_focus(FOCUS_ORDER[next], now);
    }

    fn edit(&mut self, field: Field, edit: impl FnOnce(&mut String)) {
        let mut value = self.query.form().get(field).to_string();
        edit(&mut value);
        self.query.set_field(field, &value);
        if let Some(list) = self.dropdown_mut(field) {
            list.on_input();
        }
        self.highlighted = None;
    }

    fn move_highlight(&mut self, down: bool) {
        let Focus::Input(field) = self.focus else {
            return;
        };
        let Some((shown, suggestions)) = self.visible_list() else {
            return;
        };
        if shown != field {
            return;
        }
        let len = suggestions.len();
        self.highlighted = Some(match (self.highlighted, down) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
    }

    fn submit(&mut self) -> SearchOutcome {
        for field in [Field::Carrier, Field::Origin, Field::Destination] {
            if let Some(list) = self.dropdown_mut(field) {
                list.dismiss();
            }
        }
        self.highlighted = None;
        match self.query.begin_submit() {
            Some(pending) => SearchOutcome::Submitted(pending),
            None => SearchOutcome::Handled,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> SearchOutcome {
        match key.code {
            KeyCode::Esc => match self.visible_list() {
                Some((field, _)) => {
                    if let Some(list) = self.dropdown_mut(field) {
                        list.dismiss();
                    }
                    self.highlighted = None;
                }
                None => return SearchOutcome::Quit,
            },
            KeyCode::Tab => self.step_focus(true, now),
            KeyCode::BackTab => self.step_focus(false, now),
            KeyCode::F(2) => return SearchOutcome::Navigate(View::Admin),
            KeyCode::F(9) => return SearchOutcome::ToggleLocale,
            KeyCode::Down => self.move_highlight(true),
            KeyCode::Up => self.move_highlight(false),
            KeyCode::Enter => {
                if let (Focus::Input(field), Some(index)) = (self.focus, self.highlighted) {
                    if self.visible_list().is_some_and(|(shown, _)| shown == field) {
                        self.select(field, index);
                        return SearchOutcome::Handled;
                    }
                }
                return self.submit();
            }
            KeyCode::Backspace => {
                if let Focus::Input(field) = self.focus {
                    self.edit(field, |v| {
                        v.pop();
                    });
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => match self.focus {
                Focus::Input(field) => self.edit(field, |v| v.push(c)),
                Focus::Submit if c == ' ' => return self.submit(),
                Focus::Submit => {}
            },
            _ => {}
        }
        SearchOutcome::Handled
    }

    pub fn handle_click(&mut self, column: u16, row: u16, now: Instant) -> SearchOutcome {
        let at = Position::new(column, row);

        if let Some((field, area, offset)) = self.hits.list {
            if area.contains(at) {
                // Border rows pick nothing.
                if row > area.y && row + 1 < area.bottom() {
                    self.select(field, offset + usize::from(row - area.y - 1));
                }
                return SearchOutcome::Handled;
            }
        }

        let target = self
            .hits
            .inputs
            .iter()
            .find(|(_, area)| area.contains(at))
            .map(|(focus, _)| *focus);
        match target {
            Some(Focus::Submit) => {
                self.move_focus(Focus::Submit, now);
                self.submit()
            }
            Some(focus) => {
                self.move_focus(focus, now);
                SearchOutcome::Handled
            }
            None => SearchOutcome::Handled,
        }
    }

    // ------------------------------------------------------------------
    // Render
    // ------------------------------------------------------------------

    pub fn render(&mut self, f: &mut Frame, area: Rect, t: &T) {
        let block = Block::default().borders(Borders::ALL).title(t.search_title);
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
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(2, 4), Constraint::Ratio(1, 4), Constraint::Ratio(1, 4)])
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(18)])
            .split(rows[1]);

        self.hits = HitAreas::default();
        self.render_input(f, top[0], Field::Carrier, t.carrier, None);
        self.render_input(f, top[1], Field::Origin, t.origin, None);
        self.render_input(f, top[2], Field::Destination, t.destination, None);
        self.render_input(f, bottom[0], Field::Departure, t.departure, Some(t.departure_hint));
        self.render_submit(f, bottom[1], t);

        if let Some(error) = self.query.error() {
            let line = Paragraph::new(Span::styled(t.query_error(error), Style::default().fg(Color::Red)));
            f.render_widget(line, rows[2]);
        }

        if let Some(result) = self.query.result() {
            card::render(f, rows[3], result, t);
        } else {
            let text = if self.query.is_loading() { t.loading } else { t.no_result };
            let placeholder = Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(placeholder, rows[3]);
        }

        // Drawn last so it overlays the card.
        self.render_list(f, area, t);
    }

    fn render_input(&mut self, f: &mut Frame, area: Rect, field: Field, title: &str, hint: Option<&str>) {
        let focus = Focus::Input(field);
        let focused = self.focus == focus;
        let value = self.query.form().get(field);

        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let content = match hint {
            Some(hint) if value.is_empty() => Span::styled(hint.to_string(), Style::default().fg(Color::DarkGray)),
            _ => Span::raw(value.to_string()),
        };
        let input = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title.to_string()),
        );
        f.render_widget(input, area);

        if focused {
            let x = area.x.saturating_add(1).saturating_add(text_width(value));
            f.set_cursor_position(Position::new(x.min(area.right().saturating_sub(2)), area.y + 1));
        }
        self.hits.inputs.push((focus, area));
    }

    fn render_submit(&mut self, f: &mut Frame, area: Rect, t: &T) {
        let loading = self.query.is_loading();
        let label = if loading { t.loading } else { t.submit };
        let style = if loading {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let border = if self.focus == Focus::Submit {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let button = Paragraph::new(Span::styled(label, style))
            .centered()
            .block(Block::default().borders(Borders::ALL).border_style(border));
        f.render_widget(button, area);
        self.hits.inputs.push((Focus::Submit, area));
    }

    fn render_list(&mut self, f: &mut Frame, bounds: Rect, t: &T) {
        let Some((field, suggestions)) = self.visible_list() else {
            return;
        };
        let Some(anchor) = self
            .hits
            .inputs
            .iter()
            .find(|(focus, _)| *focus == Focus::Input(field))
            .map(|(_, area)| *area)
        else {
            return;
        };

        let height = u16::try_from(suggestions.len()).unwrap_or(u16::MAX).saturating_add(2);
        let width = suggestions
            .iter()
            .map(|s| text_width(&s.label))
            .max()
            .unwrap_or(0)
            .saturating_add(4)
            .max(anchor.width);
        let area = Rect::new(anchor.x, anchor.bottom(), width, height).intersection(bounds);
        if area.is_empty() {
            return;
        }

        let items: Vec<ListItem> = suggestions.into_iter().map(|s| ListItem::new(s.label)).collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(t.suggestions))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow))
            .highlight_symbol(">> ");
        let mut state = ListState::default();
        state.select(self.highlighted);

        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut state);
        self.hits.list = Some((field, area, state.offset()));
    }
}
