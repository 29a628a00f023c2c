//! Mock backend configuration.

/// Settings read once at startup.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Port to listen on (default `8080`).
    pub listen_port: u16,
    /// HS256 secret used to sign login tokens.
    pub jwt_secret: String,
    /// Email of the single demo account.
    pub admin_email: String,
    /// Password of the single demo account.
    pub admin_password: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            listen_port: 8080,
            jwt_secret: "flightontime-dev-secret".to_string(),
            admin_email: "admin@flightontime.com".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}

impl MockConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable              | Default                   |
    /// |-----------------------|---------------------------|
    /// | `MOCK_PORT`           | `8080`                    |
    /// | `MOCK_JWT_SECRET`     | `flightontime-dev-secret` |
    /// | `MOCK_ADMIN_EMAIL`    | `admin@flightontime.com`  |
    /// | `MOCK_ADMIN_PASSWORD` | `admin123`                |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_port: std::env::var("MOCK_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.listen_port),
            jwt_secret: std::env::var("MOCK_JWT_SECRET").unwrap_or(defaults.jwt_secret),
            admin_email: std::env::var("MOCK_ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password: std::env::var("MOCK_ADMIN_PASSWORD")
                .unwrap_or(defaults.admin_password),
        }
    }
}
