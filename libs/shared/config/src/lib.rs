use std::env;

use chrono_tz::Tz;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub clinic_timezone: Tz,
    pub max_db_connections: u32,
    pub statement_timeout_secs: u64,
    pub debug: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("DATABASE_URL not set, using empty value");
                    String::new()
                }),
            clinic_timezone: env::var("CLINIC_TIMEZONE")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_TIMEZONE not set, defaulting to Europe/Moscow");
                    "Europe/Moscow".to_string()
                })
                .parse()
                .unwrap_or_else(|_| {
                    warn!("CLINIC_TIMEZONE is not a valid IANA zone, defaulting to Europe/Moscow");
                    Tz::Europe__Moscow
                }),
            max_db_connections: env::var("MAX_DB_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            statement_timeout_secs: env::var("STATEMENT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            debug: env::var("DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.database_url.is_empty()
    }
}
