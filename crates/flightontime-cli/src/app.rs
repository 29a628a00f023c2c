use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flightontime_sdk::{
    ClientConfig, DepartureZone, FlightOnTimeApi, PendingQuery, QueryOrchestrator, ReferenceData,
    RiskPolicy, SessionGate, SessionStore,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::app_state::{AppController, Notice};
use crate::i18n::{self, Locale, T};
use crate::router::{self, View};
use crate::tui::Action;
use crate::ui::admin;
use crate::ui::login::{LoginOutcome, LoginScreen};
use crate::ui::search::{SearchOutcome, SearchScreen};

pub struct App<A, S> {
    api: A,
    gate: SessionGate<S>,
    tx: UnboundedSender<Action>,
    locale: Locale,
    t: T,
    api_url: String,
    policy: RiskPolicy,
    zone: DepartureZone,
    reference: ReferenceData,
    view: View,
    search: SearchScreen,
    login: LoginScreen,
    notice: Option<Notice>,
    should_quit: bool,
}

impl<A, S> App<A, S>
where
    A: FlightOnTimeApi + Clone + Send + Sync + 'static,
    S: SessionStore,
{
    pub fn new(
        api: A,
        gate: SessionGate<S>,
        config: &ClientConfig,
        locale: Locale,
        tx: UnboundedSender<Action>,
    ) -> Self {
        let reference = ReferenceData::default();
        Self {
            search: SearchScreen::new(
                QueryOrchestrator::new(config.risk_policy, config.departure_zone),
                reference.clone(),
            ),
            api,
            gate,
            tx,
            locale,
            t: i18n::t(locale),
            api_url: config.api_url.clone(),
            policy: config.risk_policy,
            zone: config.departure_zone,
            reference,
            view: View::Search,
            login: LoginScreen::default(),
            notice: None,
            should_quit: false,
        }
    }

    /// Kick off the reference list fetch.
    pub fn start(&self) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let data = ReferenceData::load(&api).await;
            let _ = tx.send(Action::ReferenceLoaded(data));
        });
    }

    fn navigate(&mut self, requested: View) {
        let next = router::resolve(requested, &self.gate);
        if next == self.view {
            return;
        }
        debug!(from = ?self.view, to = ?next, "navigate");
        match self.view {
            View::Search => self.search.unmount(),
            View::Login => self.login = LoginScreen::default(),
            View::Admin => {}
        }
        if next == View::Search {
            self.search = SearchScreen::new(
                QueryOrchestrator::new(self.policy, self.zone),
                self.reference.clone(),
            );
        }
        self.view = next;
    }

    /// Re-resolve the current view against the gate; the session can be
    /// cleared from outside the TUI while a protected view is open.
    fn enforce_gate(&mut self) {
        if router::resolve(self.view, &self.gate) != self.view {
            info!(view = ?self.view, "session gone, leaving protected view");
            self.navigate(self.view);
        }
    }

    fn spawn_prediction(&self, pending: PendingQuery) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = api.predict(pending.request()).await;
            let _ = tx.send(Action::PredictionFinished(pending.ticket(), outcome));
        });
    }

    fn spawn_login(&self, email: String, password: String) {
        info!(%email, "login attempt");
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = api.login(&email, &password).await;
            let _ = tx.send(Action::LoginFinished(outcome));
        });
    }

    fn logout(&mut self) {
        if let Err(e) = self.gate.clear_session() {
            warn!(error = %e, "failed to clear session");
        }
        info!("logged out");
        self.notice = Some(Notice::new(self.t.logged_out));
        self.navigate(View::Search);
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.view {
            View::Search => match self.search.handle_key(key, Instant::now()) {
                SearchOutcome::Handled => {}
                SearchOutcome::Submitted(pending) => self.spawn_prediction(pending),
                SearchOutcome::Navigate(view) => self.navigate(view),
                SearchOutcome::ToggleLocale => {
                    self.locale = self.locale.next();
                    self.t = i18n::t(self.locale);
                }
                SearchOutcome::Quit => self.should_quit = true,
            },
            View::Login => match self.login.handle_key(key) {
                LoginOutcome::Handled => {}
                LoginOutcome::Submit { email, password } => self.spawn_login(email, password),
                LoginOutcome::Back => self.navigate(View::Search),
            },
            View::Admin => match key.code {
                KeyCode::Char('l' | 'L') => self.logout(),
                KeyCode::Esc => self.navigate(View::Search),
                _ => {}
            },
        }
    }

    fn on_login_finished(&mut self, outcome: Result<String, flightontime_sdk::SdkError>) {
        if self.view != View::Login || !self.login.is_pending() {
            debug!("login response discarded: login view closed");
            return;
        }
        let stored = outcome.and_then(|token| self.gate.set_session(&token));
        match stored {
            Ok(()) => {
                info!("login succeeded");
                self.notice = Some(Notice::new(self.t.logged_in));
                self.navigate(View::Admin);
            }
            Err(e) => {
                warn!(error = %e, "login failed");
                self.login.failed(&e);
            }
        }
    }
}

impl<A, S> AppController for App<A, S>
where
    A: FlightOnTimeApi + Clone + Send + Sync + 'static,
    S: SessionStore,
{
    fn update(&mut self, action: Action) {
        match action {
            Action::Key(key) => self.on_key(key),
            Action::Click { column, row } => {
                if self.view == View::Search {
                    if let SearchOutcome::Submitted(pending) =
                        self.search.handle_click(column, row, Instant::now())
                    {
                        self.spawn_prediction(pending);
                    }
                }
            }
            Action::Tick => {
                self.enforce_gate();
                let now = Instant::now();
                self.search.tick(now);
                if self.notice.as_ref().is_some_and(|n| n.expired(now)) {
                    self.notice = None;
                }
            }
            Action::ReferenceLoaded(data) => {
                self.search.set_reference(data.clone());
                self.reference = data;
            }
            Action::PredictionFinished(ticket, outcome) => {
                if self.search.query_mut().complete(ticket, outcome) {
                    debug!(state = ?self.search.query().state(), "prediction completed");
                }
            }
            Action::LoginFinished(outcome) => self.on_login_finished(outcome),
            Action::Resize(..) => {}
        }
    }

    fn render(&mut self, f: &mut Frame) {
        self.enforce_gate();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        let (session, session_color) = if self.gate.has_session() {
            (self.t.session_active, Color::Green)
        } else {
            (self.t.no_session, Color::DarkGray)
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled("FlightOnTime", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  [{}]  ", self.locale.label())),
            Span::styled(session, Style::default().fg(session_color)),
        ]));
        f.render_widget(header, chunks[0]);

        let help = match self.view {
            View::Search => {
                self.search.render(f, chunks[1], &self.t);
                self.t.help_search
            }
            View::Login => {
                self.login.render(f, chunks[1], &self.t);
                self.t.help_login
            }
            View::Admin => {
                admin::render(f, chunks[1], &self.t, &self.api_url);
                self.t.help_admin
            }
        };

        let footer = match &self.notice {
            Some(notice) => Span::styled(notice.text, Style::default().fg(Color::Cyan)),
            None => Span::styled(help, Style::default().fg(Color::DarkGray)),
        };
        f.render_widget(Paragraph::new(footer), chunks[2]);
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}
