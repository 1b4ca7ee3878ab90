use crate::auth::jwt::JwtConfig;

/// Default period between daily cap sweeps.
const DEFAULT_DAILY_CAP_RESET_INTERVAL_HOURS: u64 = 24;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Hours between scheduled daily cap resets, aligned to UTC (default: `24`,
    /// i.e. every midnight).
    pub daily_cap_reset_interval_hours: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `HOST`                           | `0.0.0.0`               |
    /// | `PORT`                           | `3000`                  |
    /// | `CORS_ORIGINS`                   | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`           | `30`                    |
    /// | `DAILY_CAP_RESET_INTERVAL_HOURS` | `24`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let daily_cap_reset_interval_hours: u64 = std::env::var("DAILY_CAP_RESET_INTERVAL_HOURS")
            .unwrap_or_else(|_| DEFAULT_DAILY_CAP_RESET_INTERVAL_HOURS.to_string())
            .parse()
            .expect("DAILY_CAP_RESET_INTERVAL_HOURS must be a valid u64");
        assert!(
            daily_cap_reset_interval_hours > 0,
            "DAILY_CAP_RESET_INTERVAL_HOURS must be at least 1"
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            daily_cap_reset_interval_hours,
            jwt,
        }
    }
}
