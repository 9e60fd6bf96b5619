//! Process settings for the classroom API, read once at startup.

use std::str::FromStr;

/// Bind address, CORS, timeouts and pool size for one server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to call the API.
    pub cors_origins: Vec<String>,
    /// Requests running longer than this get a 408.
    pub request_timeout_secs: u64,
    /// Upper bound on draining the database pool after the listener stops.
    pub shutdown_timeout_secs: u64,
    pub db_max_connections: u32,
}

impl ServerConfig {
    /// Read settings from the environment (after `.env` has been loaded).
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `8080`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `DB_MAX_CONNECTIONS`    | `20`                    |
    ///
    /// Panics on values that do not parse, so a bad deployment stops at boot.
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 8080),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 20),
        }
    }
}

/// Parse `key` from the environment, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{key} has invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_uses_default_when_unset() {
        assert_eq!(env_or("CLASSROOM_TEST_UNSET_PORT", 8080u16), 8080);
    }

    #[test]
    fn env_or_parses_set_value() {
        std::env::set_var("CLASSROOM_TEST_TIMEOUT_SECS", "45");
        assert_eq!(env_or("CLASSROOM_TEST_TIMEOUT_SECS", 30u64), 45);
    }

    #[test]
    #[should_panic(expected = "CLASSROOM_TEST_BAD_PORT has invalid value")]
    fn env_or_panics_on_unparseable_value() {
        std::env::set_var("CLASSROOM_TEST_BAD_PORT", "not-a-port");
        env_or::<u16>("CLASSROOM_TEST_BAD_PORT", 8080);
    }
}
