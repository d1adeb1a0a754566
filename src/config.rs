//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Parsing goes through
//! [`GatewayConfig::from_lookup`] so tests can feed a plain map instead of
//! mutating the process environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use reqwest::Url;

use crate::domain::QueryOptions;
use crate::domain::lookup::DEFAULT_LOOKUP_TIMEOUT;

/// Default port the HTTP server binds to.
pub const DEFAULT_PORT: u16 = 5000;

/// Default table for stored lookups.
pub const DEFAULT_TABLE: &str = "cedulas";

/// Default MySQL port when `DB_HOST` carries none.
pub const DEFAULT_DB_PORT: u16 = 3306;

/// Default base URL of the scraping service.
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is present but its value cannot be used.
    #[error("invalid value for {name}='{value}': {reason}")]
    InvalidValue {
        /// Environment variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::InvalidValue {
            name,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (`HOST`:`PORT`).
    pub listen_addr: SocketAddr,

    /// Base URL of the external scraping service.
    pub service_url: Url,

    /// Options forwarded to every lookup.
    pub query_options: QueryOptions,

    /// Optional MySQL settings for recording lookups.
    pub persistence: PersistenceConfig,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Falls back to defaults for every unset variable.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `HOST`, `PORT`, `CONSULTA_SERVICE_URL`,
    /// `CONSULTA_TIMEOUT_SECS` or `CONSULTA_HEADLESS` is set to an unusable
    /// value.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match non_empty(&get, "HOST") {
            Some(raw) => raw
                .parse::<IpAddr>()
                .map_err(|e| ConfigError::invalid("HOST", &raw, e))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = match non_empty(&get, "PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("PORT", &raw, e))?,
            None => DEFAULT_PORT,
        };

        let raw_url =
            non_empty(&get, "CONSULTA_SERVICE_URL").unwrap_or_else(|| DEFAULT_SERVICE_URL.into());
        let service_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::invalid("CONSULTA_SERVICE_URL", &raw_url, e))?;

        let timeout = match non_empty(&get, "CONSULTA_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                Ok(_) => {
                    return Err(ConfigError::invalid(
                        "CONSULTA_TIMEOUT_SECS",
                        &raw,
                        "must be positive",
                    ));
                }
                Err(e) => return Err(ConfigError::invalid("CONSULTA_TIMEOUT_SECS", &raw, e)),
            },
            None => DEFAULT_LOOKUP_TIMEOUT,
        };
        let headless = match non_empty(&get, "CONSULTA_HEADLESS") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::invalid("CONSULTA_HEADLESS", &raw, "expected bool"))?,
            None => true,
        };

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            service_url,
            query_options: QueryOptions { headless, timeout },
            persistence: PersistenceConfig::from_lookup(get),
        })
    }
}

/// Database settings for the optional persistence path.
///
/// Every field is kept as read; completeness is checked per write by
/// [`PersistenceConfig::connection_settings`].
#[derive(Clone, Default)]
pub struct PersistenceConfig {
    /// `DB_HOST`, optionally with a `:port` suffix.
    pub host: Option<String>,
    /// `DB_USER`.
    pub user: Option<String>,
    /// `DB_PASSWORD`.
    pub password: Option<String>,
    /// `DB_NAME`.
    pub database: Option<String>,
    /// `DB_TABLE`, defaulting to [`DEFAULT_TABLE`].
    pub table: String,
}

impl std::fmt::Debug for PersistenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("table", &self.table)
            .finish()
    }
}

impl PersistenceConfig {
    /// Reads the `DB_*` variables through `get`.
    ///
    /// Connection values are kept verbatim, surrounding whitespace included;
    /// only an empty string counts as unset.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let verbatim = |key: &str| get(key).filter(|v| !v.is_empty());
        Self {
            host: verbatim("DB_HOST"),
            user: verbatim("DB_USER"),
            password: verbatim("DB_PASSWORD"),
            database: verbatim("DB_NAME"),
            table: non_empty(&get, "DB_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
        }
    }

    /// Returns the connection settings, or the names of the missing
    /// variables when the configuration is incomplete.
    ///
    /// # Errors
    ///
    /// Returns the list of unset variables (`DB_HOST`, `DB_USER`,
    /// `DB_PASSWORD`, `DB_NAME`) when any of them is missing or empty.
    pub fn connection_settings(&self) -> Result<ConnectionSettings, Vec<&'static str>> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.is_empty())
        }

        let (Some(host), Some(user), Some(password), Some(database)) = (
            present(&self.host),
            present(&self.user),
            present(&self.password),
            present(&self.database),
        ) else {
            let missing = [
                ("DB_HOST", &self.host),
                ("DB_USER", &self.user),
                ("DB_PASSWORD", &self.password),
                ("DB_NAME", &self.database),
            ]
            .into_iter()
            .filter(|(_, v)| present(v).is_none())
            .map(|(name, _)| name)
            .collect();
            return Err(missing);
        };

        let (host, port) = split_host_port(host);
        Ok(ConnectionSettings {
            host,
            port,
            user: user.to_string(),
            password: password.to_string(),
            database: database.to_string(),
        })
    }
}

/// Complete connection parameters for one write.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login user.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Schema to connect to.
    pub database: String,
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

/// Splits `host:port` or `[v6-address]:port`; a missing or unparsable port
/// falls back to [`DEFAULT_DB_PORT`].
fn split_host_port(raw: &str) -> (String, u16) {
    if let Some(rest) = raw.strip_prefix('[')
        && let Some((host, tail)) = rest.split_once(']')
    {
        let port = tail
            .strip_prefix(':')
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_DB_PORT);
        return (host.to_string(), port);
    }
    if let Some((host, port)) = raw.rsplit_once(':')
        && !host.is_empty()
        && !host.contains(':')
        && let Ok(port) = port.parse::<u16>()
    {
        return (host.to_string(), port);
    }
    (raw.to_string(), DEFAULT_DB_PORT)
}

/// Returns the trimmed value of `key`, treating empty strings as unset.
fn non_empty<F>(get: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses a boolean. Accepts `true`/`1`/`yes` and `false`/`0`/`no`
/// (case-insensitive).
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn full_db() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DB_HOST", "db.local"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "juzgados"),
        ]
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let Ok(cfg) = GatewayConfig::from_lookup(lookup(&[])) else {
            panic!("defaults should parse");
        };
        assert_eq!(cfg.listen_addr.port(), 5000);
        assert!(cfg.listen_addr.ip().is_unspecified());
        assert_eq!(cfg.query_options, QueryOptions::default());
        assert_eq!(cfg.service_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(cfg.persistence.table, "cedulas");
    }

    #[test]
    fn port_and_lookup_options_are_read() {
        let get = lookup(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("CONSULTA_TIMEOUT_SECS", "15"),
            ("CONSULTA_HEADLESS", "false"),
        ]);
        let Ok(cfg) = GatewayConfig::from_lookup(get) else {
            panic!("config should parse");
        };
        assert_eq!(cfg.listen_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.query_options.timeout, Duration::from_secs(15));
        assert!(!cfg.query_options.headless);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = GatewayConfig::from_lookup(lookup(&[("PORT", "http")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "PORT", .. })
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = GatewayConfig::from_lookup(lookup(&[("CONSULTA_TIMEOUT_SECS", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn complete_db_config_yields_settings() {
        let cfg = PersistenceConfig::from_lookup(lookup(&full_db()));
        let Ok(settings) = cfg.connection_settings() else {
            panic!("config is complete");
        };
        assert_eq!(settings.host, "db.local");
        assert_eq!(settings.port, 3306);
        assert_eq!(settings.database, "juzgados");
    }

    #[test]
    fn host_may_carry_port() {
        let mut pairs = full_db();
        pairs[0] = ("DB_HOST", "db.local:3307");
        let cfg = PersistenceConfig::from_lookup(lookup(&pairs));
        let Ok(settings) = cfg.connection_settings() else {
            panic!("config is complete");
        };
        assert_eq!(settings.host, "db.local");
        assert_eq!(settings.port, 3307);
    }

    #[test]
    fn each_missing_value_is_reported() {
        for skip in ["DB_HOST", "DB_USER", "DB_PASSWORD", "DB_NAME"] {
            let pairs: Vec<_> = full_db().into_iter().filter(|(k, _)| *k != skip).collect();
            let cfg = PersistenceConfig::from_lookup(lookup(&pairs));
            assert_eq!(cfg.connection_settings(), Err(vec![skip]));
        }
    }

    #[test]
    fn empty_values_count_as_missing() {
        let mut pairs = full_db();
        pairs[2] = ("DB_PASSWORD", "");
        let cfg = PersistenceConfig::from_lookup(lookup(&pairs));
        assert_eq!(cfg.connection_settings(), Err(vec!["DB_PASSWORD"]));
    }

    #[test]
    fn whitespace_values_are_present() {
        let mut pairs = full_db();
        pairs[2] = ("DB_PASSWORD", "   ");
        let cfg = PersistenceConfig::from_lookup(lookup(&pairs));
        let Ok(settings) = cfg.connection_settings() else {
            panic!("whitespace is a value");
        };
        assert_eq!(settings.password, "   ");
    }

    #[test]
    fn password_is_passed_through_untrimmed() {
        let mut pairs = full_db();
        pairs[2] = ("DB_PASSWORD", " pa ss ");
        let cfg = PersistenceConfig::from_lookup(lookup(&pairs));
        let Ok(settings) = cfg.connection_settings() else {
            panic!("config is complete");
        };
        assert_eq!(settings.password, " pa ss ");
        assert_eq!(settings.user, "app");
    }

    #[test]
    fn bracketed_ipv6_host_is_split() {
        let mut pairs = full_db();
        pairs[0] = ("DB_HOST", "[::1]:3307");
        let cfg = PersistenceConfig::from_lookup(lookup(&pairs));
        let Ok(settings) = cfg.connection_settings() else {
            panic!("config is complete");
        };
        assert_eq!(settings.host, "::1");
        assert_eq!(settings.port, 3307);

        assert_eq!(split_host_port("[::1]"), ("::1".to_string(), 3306));
        assert_eq!(split_host_port("::1"), ("::1".to_string(), 3306));
    }

    #[test]
    fn custom_table_is_read() {
        let cfg = PersistenceConfig::from_lookup(lookup(&[("DB_TABLE", "consultas")]));
        assert_eq!(cfg.table, "consultas");
    }

    #[test]
    fn debug_output_hides_password() {
        let cfg = PersistenceConfig::from_lookup(lookup(&full_db()));
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret"));
    }
}
