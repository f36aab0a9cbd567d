use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

const DEVELOPMENT_TOKEN_SECRET: &str = "job-board-development-secret";
const DEFAULT_SESSION_TTL_MINUTES: i64 = 120;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let token_secret = match env::var("ACCESS_TOKEN_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment.is_production() => return Err(ConfigError::MissingSecret),
            _ => DEVELOPMENT_TOKEN_SECRET.to_string(),
        };

        let ttl_minutes = match env::var("SESSION_TTL_MINUTES") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or(ConfigError::InvalidSessionTtl)?,
            Err(_) => DEFAULT_SESSION_TTL_MINUTES,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            session: SessionConfig {
                token_secret,
                ttl_minutes,
                secure_cookie: environment.is_production(),
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Session token signing and cookie settings.
#[derive(Clone)]
pub struct SessionConfig {
    pub token_secret: String,
    pub ttl_minutes: i64,
    /// Production cookies carry `Secure` and `SameSite=None`.
    pub secure_cookie: bool,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("token_secret", &"<redacted>")
            .field("ttl_minutes", &self.ttl_minutes)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingSecret,
    InvalidSessionTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingSecret => {
                write!(f, "ACCESS_TOKEN_SECRET must be set in production")
            }
            ConfigError::InvalidSessionTtl => {
                write!(f, "SESSION_TTL_MINUTES must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::MissingSecret
            | ConfigError::InvalidSessionTtl => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("ACCESS_TOKEN_SECRET");
        env::remove_var("SESSION_TTL_MINUTES");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.session.ttl_minutes, 120);
        assert!(!config.session.secure_cookie);
        assert!(!config.session.token_secret.is_empty());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn production_requires_token_secret() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        assert!(matches!(AppConfig::load(), Err(ConfigError::MissingSecret)));

        env::set_var("ACCESS_TOKEN_SECRET", "prod-secret");
        let config = AppConfig::load().expect("config loads with secret");
        assert!(config.session.secure_cookie);
        assert_eq!(config.session.token_secret, "prod-secret");
        reset_env();
    }

    #[test]
    fn rejects_non_positive_session_ttl() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SESSION_TTL_MINUTES", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidSessionTtl)
        ));
        reset_env();
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = SessionConfig {
            token_secret: "do-not-print".to_string(),
            ttl_minutes: 5,
            secure_cookie: false,
        };
        assert!(!format!("{config:?}").contains("do-not-print"));
    }
}
