//! Login DTOs for `POST /auth/login`.

use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account e-mail.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Success body of `POST /auth/login`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    /// Opaque session token.
    #[serde(alias = "access_token")]
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_accepts_both_token_names() {
        let a: LoginResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        let b: LoginResponse = serde_json::from_str(r#"{"access_token":"abc","type":"Bearer"}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn debug_hides_password() {
        let req = LoginRequest {
            email: "admin@flightontime.dev".into(),
            password: "hunter2".into(),
        };
        let printed = format!("{req:?}");
        assert!(printed.contains("admin@flightontime.dev"));
        assert!(!printed.contains("hunter2"));
    }
}
