use std::time::{Duration, Instant};

use crate::tui::Action;

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Short-lived status line message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: &'static str,
    pub shown_at: Instant,
}

impl Notice {
    pub fn new(text: &'static str) -> Self {
        Self {
            text,
            shown_at: Instant::now(),
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) > NOTICE_TTL
    }
}

pub trait AppController {
    fn update(&mut self, action: Action);
    fn render(&mut self, f: &mut ratatui::Frame);
    fn should_quit(&self) -> bool;
}
