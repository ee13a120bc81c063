use std::env;
use std::str::FromStr;

const DEFAULT_API_BASE: &str = "http://localhost:3001/api";
const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:3000,http://localhost:5173,http://127.0.0.1:3000,http://127.0.0.1:5173";

/// Runtime configuration, read from the environment (after `dotenv`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_base_url: String,
    pub backend_timeout_secs: u64,
    pub reminder_interval_secs: u64,
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3002,
            api_base_url: DEFAULT_API_BASE.to_string(),
            backend_timeout_secs: 10,
            reminder_interval_secs: 60,
            cors_origins: split_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            api_base_url: lookup("CRM_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            backend_timeout_secs: parse_or(
                "BACKEND_TIMEOUT_SECS",
                lookup("BACKEND_TIMEOUT_SECS"),
                defaults.backend_timeout_secs,
            ),
            reminder_interval_secs: parse_or(
                "REMINDER_INTERVAL_SECS",
                lookup("REMINDER_INTERVAL_SECS"),
                defaults.reminder_interval_secs,
            )
            .max(1),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|v| split_origins(&v))
                .unwrap_or(defaults.cors_origins),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("⚠️  Invalid {}='{}', using default {}", key, value, default);
            default
        }),
        None => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
