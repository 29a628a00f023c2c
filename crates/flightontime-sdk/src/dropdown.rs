//! Suggestion-list visibility for one autocomplete field.
//!
//! A pointer selection lands *after* the field loses focus, so hiding the
//! list on blur must wait [`BLUR_HIDE_DELAY`]. The blur only records a
//! deadline; the list closes on the first [`Dropdown::tick`] past it,
//! unless focus came back or a suggestion was picked first.

use std::time::{Duration, Instant};

/// Delay between focus loss and the list actually closing.
pub const BLUR_HIDE_DELAY: Duration = Duration::from_millis(150);

/// Whether the suggestion list is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    /// Hidden.
    #[default]
    Closed,
    /// Shown (if there is anything to show).
    Open,
}

/// Visibility state machine for one field's suggestion list.
#[derive(Debug, Clone, Default)]
pub struct Dropdown {
    state: DropdownState,
    hide_at: Option<Instant>,
}

impl Dropdown {
    /// Field gained focus.
    pub fn on_focus(&mut self) {
        self.open();
    }

    /// User typed in the field.
    pub fn on_input(&mut self) {
        self.open();
    }

    /// Field lost focus at `now`; close once the delay has elapsed.
    pub fn on_blur(&mut self, now: Instant) {
        if self.state == DropdownState::Open {
            self.hide_at = Some(now + BLUR_HIDE_DELAY);
        }
    }

    /// A suggestion was picked; closes immediately.
    pub fn on_select(&mut self) {
        self.state = DropdownState::Closed;
        self.hide_at = None;
    }

    /// List dismissed without a selection (escape); closes immediately.
    pub fn dismiss(&mut self) {
        self.state = DropdownState::Closed;
        self.hide_at = None;
    }

    /// Apply a pending hide whose deadline has passed. Returns `true` if
    /// the list closed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.state = DropdownState::Closed;
                self.hide_at = None;
                true
            }
            _ => false,
        }
    }

    /// Current state.
    pub fn state(&self) -> DropdownState {
        self.state
    }

    /// `true` while the list is shown, including during the blur delay.
    pub fn is_open(&self) -> bool {
        self.state == DropdownState::Open
    }

    fn open(&mut self) {
        self.state = DropdownState::Open;
        self.hide_at = None;
    }
}
