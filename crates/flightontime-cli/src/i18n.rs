use clap::ValueEnum;
use flightontime_sdk::{FieldError, QueryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Locale {
    #[default]
    Pt,
    En,
}

impl Locale {
    pub fn label(&self) -> &'static str {
        match self {
            Locale::Pt => "PT",
            Locale::En => "EN",
        }
    }

    pub fn next(&self) -> Locale {
        match self {
            Locale::Pt => Locale::En,
            Locale::En => Locale::Pt,
        }
    }
}

/// All user-facing strings. Call `t(locale)` to get the table for a locale.
pub struct T {
    // ── Search ──
    pub search_title: &'static str,
    pub carrier: &'static str,
    pub origin: &'static str,
    pub destination: &'static str,
    pub departure: &'static str,
    pub departure_hint: &'static str,
    pub submit: &'static str,
    pub loading: &'static str,
    pub suggestions: &'static str,
    pub no_result: &'static str,

    // ── Errors ──
    pub origin_invalid: &'static str,
    pub destination_invalid: &'static str,
    pub departure_invalid: &'static str,
    pub request_failed: &'static str,

    // ── Result card ──
    pub forecast: &'static str,
    pub delay_risk: &'static str,
    pub probability: &'static str,

    // ── Login / admin ──
    pub login_title: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub logging_in: &'static str,
    pub invalid_credentials: &'static str,
    pub login_error: &'static str,
    pub logged_in: &'static str,
    pub admin_title: &'static str,
    pub api_url: &'static str,
    pub session_active: &'static str,
    pub no_session: &'static str,
    pub logged_out: &'static str,

    // ── Key help ──
    pub help_search: &'static str,
    pub help_login: &'static str,
    pub help_admin: &'static str,
}

pub fn t(locale: Locale) -> T {
    match locale {
        Locale::Pt => T {
            search_title: "Consultar previsão de voo",
            carrier: "Companhia",
            origin: "Origem",
            destination: "Destino",
            departure: "Partida",
            departure_hint: "AAAA-MM-DDTHH:MM",
            submit: "Consultar",
            loading: "Consultando...",
            suggestions: "Sugestões",
            no_result: "Nenhuma consulta realizada",

            origin_invalid: "Origem deve ser um código IATA válido (ex: GRU)",
            destination_invalid: "Destino deve ser um código IATA válido (ex: GIG)",
            departure_invalid: "Informe uma data e hora de partida válida",
            request_failed: "Erro ao consultar previsão do voo.",

            forecast: "Previsão",
            delay_risk: "Risco de atraso",
            probability: "Probabilidade",

            login_title: "Entrar",
            email: "E-mail",
            password: "Senha",
            logging_in: "Entrando...",
            invalid_credentials: "E-mail ou senha inválidos",
            login_error: "Erro ao entrar. Tente novamente.",
            logged_in: "Login realizado",
            admin_title: "Administração",
            api_url: "API",
            session_active: "Sessão ativa",
            no_session: "Nenhuma sessão ativa",
            logged_out: "Sessão encerrada",

            help_search: "Tab: próximo campo  ↑↓: sugestões  Enter: consultar  F2: admin  F9: idioma  Esc: sair",
            help_login: "Tab: próximo campo  Enter: entrar  Esc: voltar",
            help_admin: "L: encerrar sessão  Esc: voltar",
        },
        Locale::En => T {
            search_title: "Flight delay forecast",
            carrier: "Airline",
            origin: "Origin",
            destination: "Destination",
            departure: "Departure",
            departure_hint: "YYYY-MM-DDTHH:MM",
            submit: "Check",
            loading: "Checking...",
            suggestions: "Suggestions",
            no_result: "No query yet",

            origin_invalid: "Origin must be a valid IATA code (e.g. GRU)",
            destination_invalid: "Destination must be a valid IATA code (e.g. GIG)",
            departure_invalid: "Enter a valid departure date and time",
            request_failed: "Could not fetch the flight prediction.",

            forecast: "Forecast",
            delay_risk: "Delay risk",
            probability: "Probability",

            login_title: "Sign in",
            email: "Email",
            password: "Password",
            logging_in: "Signing in...",
            invalid_credentials: "Invalid email or password",
            login_error: "Sign-in failed. Please try again.",
            logged_in: "Signed in",
            admin_title: "Administration",
            api_url: "API",
            session_active: "Session active",
            no_session: "Not signed in",
            logged_out: "Logged out",

            help_search: "Tab: next field  ↑↓: suggestions  Enter: check  F2: admin  F9: language  Esc: quit",
            help_login: "Tab: next field  Enter: sign in  Esc: back",
            help_admin: "L: log out  Esc: back",
        },
    }
}

impl T {
    pub fn query_error(&self, error: QueryError) -> &'static str {
        match error {
            QueryError::Validation(FieldError::Origin) => self.origin_invalid,
            QueryError::Validation(FieldError::Destination) => self.destination_invalid,
            QueryError::Validation(FieldError::Departure) => self.departure_invalid,
            QueryError::RequestFailed => self.request_failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portuguese_is_the_default() {
        assert_eq!(Locale::default(), Locale::Pt);
        assert_eq!(
            t(Locale::default()).query_error(QueryError::RequestFailed),
            "Erro ao consultar previsão do voo."
        );
    }

    #[test]
    fn field_errors_map_to_their_own_message() {
        let pt = t(Locale::Pt);
        assert_eq!(
            pt.query_error(FieldError::Origin.into()),
            "Origem deve ser um código IATA válido (ex: GRU)"
        );
        assert_eq!(
            pt.query_error(FieldError::Destination.into()),
            "Destino deve ser um código IATA válido (ex: GIG)"
        );
    }

    #[test]
    fn next_cycles() {
        assert_eq!(Locale::Pt.next(), Locale::En);
        assert_eq!(Locale::En.next().label(), "PT");
    }
}
