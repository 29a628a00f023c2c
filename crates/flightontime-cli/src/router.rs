//! View routing with session gating.

use flightontime_sdk::{SessionGate, SessionStore};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Public search form.
    #[default]
    Search,
    Login,
    /// Protected.
    Admin,
}

impl View {
    pub fn requires_session(self) -> bool {
        matches!(self, View::Admin)
    }
}

/// The view actually shown when `requested` is asked for.
pub fn resolve<S: SessionStore>(requested: View, gate: &SessionGate<S>) -> View {
    if requested.requires_session() && !gate.has_session() {
        debug!(?requested, "no session, redirecting to login");
        View::Login
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightontime_sdk::MemorySessionStore;

    #[test]
    fn public_views_are_always_reachable() {
        let gate = SessionGate::new(MemorySessionStore::default());
        assert_eq!(resolve(View::Search, &gate), View::Search);
        assert_eq!(resolve(View::Login, &gate), View::Login);
    }

    #[test]
    fn admin_without_session_yields_login() {
        let gate = SessionGate::new(MemorySessionStore::default());
        assert_eq!(resolve(View::Admin, &gate), View::Login);
    }

    #[test]
    fn admin_with_session_is_shown() {
        let gate = SessionGate::new(MemorySessionStore::default());
        gate.set_session("jwt").unwrap();
        assert_eq!(resolve(View::Admin, &gate), View::Admin);

        gate.clear_session().unwrap();
        assert_eq!(resolve(View::Admin, &gate), View::Login);
    }
}
