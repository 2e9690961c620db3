//! Environment configuration
//!
//! Values come from process environment variables (optionally loaded from a
//! `.env` file by the binary). Every key has a default so the service boots
//! without any configuration.

use std::env;
use std::str::FromStr;

pub const DEFAULT_FUEL_PRICE: f64 = 5000.0;

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub log_level: String,
    pub default_fuel_price: f64,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    // Credentials for the bootstrap admin login
    pub admin_username: String,
    pub admin_password: String,
    pub admin_display_name: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env_or("ENVIRONMENT", "development"),
            port: parse_or("PORT", 3000),
            host: env_or("HOST", "0.0.0.0"),
            log_level: env_or("LOG_LEVEL", "debug"),
            default_fuel_price: positive_or("DEFAULT_FUEL_PRICE", DEFAULT_FUEL_PRICE),
            jwt_secret: env_or("JWT_SECRET", "drivesync-development-secret"),
            jwt_expiration: parse_or("JWT_EXPIRATION", 3600),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            admin_username: env_or("ADMIN_USERNAME", "admin"),
            admin_password: env_or("ADMIN_PASSWORD", "password123"),
            admin_display_name: env_or("ADMIN_DISPLAY_NAME", crate::models::BOOTSTRAP_ADMIN_NAME),
        }
    }
}

impl EnvironmentConfig {
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Level for the tracing subscriber, `DEBUG` when unparseable
    pub fn tracing_level(&self) -> tracing::Level {
        tracing::Level::from_str(&self.log_level).unwrap_or(tracing::Level::DEBUG)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("⚠️ {} has an invalid value '{}', using default", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

/// Like [`parse_or`], but zero, negative and non-finite values also fall back
fn positive_or(key: &str, default: f64) -> f64 {
    let value = parse_or(key, default);
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("⚠️ {} must be positive, got {}, using default", key, value);
        default
    }
}
