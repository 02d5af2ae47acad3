use crate::utils::{AppError, AppResult};
use std::env;
use std::time::Duration;
use url::Url;

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout: Duration,
    pub db_idle_timeout: Duration,
    pub db_ensure_schema: bool,
    pub cors_allowed_origins: Vec<String>,
}

impl Settings {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let host = get_or("HOST", "0.0.0.0");
        let port = parse_var::<u16>("PORT", &get_or("PORT", "3002"))?;
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Config("DATABASE_URL must be set".to_string()))?;

        let db_max_connections = parse_var::<u32>("DB_MAX_CONNECTIONS", &get_or("DB_MAX_CONNECTIONS", "20"))?;
        let db_min_connections = parse_var::<u32>("DB_MIN_CONNECTIONS", &get_or("DB_MIN_CONNECTIONS", "5"))?;
        if db_min_connections > db_max_connections {
            return Err(AppError::Config(format!(
                "DB_MIN_CONNECTIONS ({}) exceeds DB_MAX_CONNECTIONS ({})",
                db_min_connections, db_max_connections
            )));
        }

        let db_acquire_timeout = Duration::from_secs(parse_var::<u64>(
            "DB_ACQUIRE_TIMEOUT_SECS",
            &get_or("DB_ACQUIRE_TIMEOUT_SECS", "5"),
        )?);
        let db_idle_timeout = Duration::from_secs(parse_var::<u64>(
            "DB_IDLE_TIMEOUT_SECS",
            &get_or("DB_IDLE_TIMEOUT_SECS", "300"),
        )?);
        let db_ensure_schema = parse_var::<bool>("DB_ENSURE_SCHEMA", &get_or("DB_ENSURE_SCHEMA", "false"))?;

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            db_min_connections,
            db_acquire_timeout,
            db_idle_timeout,
            db_ensure_schema,
            cors_allowed_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(key: &str, raw: &str) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", key, raw, e)))
}

/// Masks every password a Postgres URL can carry (userinfo and the
/// `password` query parameter) so it can be logged.
pub fn redact_url(raw: &str) -> String {
    const MASK: &str = "***";

    let Ok(mut url) = Url::parse(raw) else {
        return "<unparseable database url>".to_string();
    };

    if url.password().is_some() && url.set_password(Some(MASK)).is_err() {
        return "<unparseable database url>".to_string();
    }

    let carries_password = url
        .query_pairs()
        .any(|(key, _)| key.eq_ignore_ascii_case("password"));
    if carries_password {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| {
                if key.eq_ignore_ascii_case("password") {
                    (key.into_owned(), MASK.to_string())
                } else {
                    (key.into_owned(), value.into_owned())
                }
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> AppResult<Settings> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[("DATABASE_URL", "postgres://localhost/users")]).unwrap();
        assert_eq!(settings.bind_address(), "0.0.0.0:3002");
        assert_eq!(settings.db_max_connections, 20);
        assert_eq!(settings.db_min_connections, 5);
        assert_eq!(settings.db_acquire_timeout, Duration::from_secs(5));
        assert_eq!(settings.db_idle_timeout, Duration::from_secs(300));
        assert!(!settings.db_ensure_schema);
        assert!(settings.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_missing_database_url() {
        let err = settings_from(&[]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_port() {
        let err = settings_from(&[("DATABASE_URL", "postgres://db"), ("PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_min_above_max_rejected() {
        let err = settings_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("DB_MAX_CONNECTIONS", "2"),
            ("DB_MIN_CONNECTIONS", "4"),
        ])
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let settings = settings_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DB_ENSURE_SCHEMA", "true"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000, ,http://127.0.0.1:3000"),
        ])
        .unwrap();
        assert_eq!(settings.bind_address(), "127.0.0.1:8080");
        assert!(settings.db_ensure_schema);
        assert_eq!(
            settings.cors_allowed_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
    }

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact_url("postgres://app:secret@db:5432/users"),
            "postgres://app:***@db:5432/users"
        );
        assert_eq!(redact_url("postgres://app@db/users"), "postgres://app@db/users");
        assert_eq!(redact_url("postgres://db/users"), "postgres://db/users");
    }

    #[test]
    fn test_redact_url_masks_query_password() {
        let redacted = redact_url("postgres://localhost/users?user=app&password=secret");
        assert!(!redacted.contains("secret"), "leaked: {}", redacted);
        assert!(redacted.contains("password=***"));
        assert!(redacted.contains("user=app"));

        let both = redact_url("postgres://app:one@db/users?sslmode=require&PASSWORD=two");
        assert!(!both.contains("one"), "leaked: {}", both);
        assert!(!both.contains("two"), "leaked: {}", both);
        assert!(both.contains("sslmode=require"));
    }

    #[test]
    fn test_redact_url_hides_unparseable_input() {
        let redacted = redact_url("postgres://app:secret@[not-an-ip/users");
        assert!(!redacted.contains("secret"));
    }
}
