//! Configuration management for Logbook.
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present) once, then serves it from a process-wide cache.

use std::env;
use std::sync::OnceLock;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub auth: AuthConfig,
    pub flash: FlashConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub max_age_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Where unauthenticated callers are sent. The login flow itself lives
    /// outside this service.
    pub login_path: String,
}

#[derive(Debug, Clone)]
pub struct FlashConfig {
    pub max_age_seconds: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_or("PORT", "8080").parse().unwrap_or(8080),
            },
            database: DatabaseConfig {
                path: env_or("DATABASE_PATH", "./data/logbook.db"),
            },
            session: SessionConfig {
                max_age_seconds: parse_session_max_age(&env_or("SESSION_MAX_AGE", "604800")),
            },
            auth: AuthConfig {
                login_path: env_or("LOGIN_PATH", "/login"),
            },
            flash: FlashConfig {
                max_age_seconds: env_or("FLASH_MAX_AGE", "60").parse().unwrap_or(60),
            },
        }
    }
}

/// Longest session lifetime accepted from the environment (10 years).
pub const MAX_SESSION_AGE_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

/// Seconds, defaulting to 7 days when unparseable and capped at
/// [`MAX_SESSION_AGE_SECONDS`].
fn parse_session_max_age(raw: &str) -> u64 {
    raw.parse::<u64>()
        .unwrap_or(604800)
        .min(MAX_SESSION_AGE_SECONDS)
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
