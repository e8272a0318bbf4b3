//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use dialogue::{HistoryScope, HubConfig};

const DEFAULT_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `text` or `json` (default: `text`)
/// - `STATIC_DIR`: directory served for non-API paths (default: `"public"`)
/// - `CATALOG_PATH`: JSON menu file (default: built-in menu)
/// - `SESSION_TTL_SECS`: idle lifetime of a session cart (default: 7 days)
/// - `HISTORY_SCOPE`: `session` or `global` (default: `session`)
///
/// Unparseable values fall back to the default.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub static_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub session_ttl: Duration,
    pub history_scope: HistoryScope,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => defaults.log_format,
            },
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            catalog_path: lookup("CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            session_ttl: lookup("SESSION_TTL_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_ttl),
            history_scope: lookup("HISTORY_SCOPE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.history_scope),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings for the conversation hub.
    pub fn hub_config(&self) -> HubConfig {
        HubConfig {
            history_scope: self.history_scope,
            session_ttl: self.session_ttl,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            static_dir: PathBuf::from("public"),
            catalog_path: None,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            history_scope: HistoryScope::Session,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert!(config.catalog_path.is_none());
        assert_eq!(config.session_ttl, Duration::from_secs(604_800));
        assert_eq!(config.history_scope, HistoryScope::Session);
    }

    #[test]
    fn test_empty_lookup_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.history_scope, HistoryScope::Session);
    }

    #[test]
    fn test_values_from_lookup() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("LOG_FORMAT", "JSON"),
            ("STATIC_DIR", "/srv/www"),
            ("CATALOG_PATH", "/etc/menu.json"),
            ("SESSION_TTL_SECS", "60"),
            ("HISTORY_SCOPE", "global"),
        ]);
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/etc/menu.json")));

        let hub = config.hub_config();
        assert_eq!(hub.session_ttl, Duration::from_secs(60));
        assert_eq!(hub.history_scope, HistoryScope::Global);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("SESSION_TTL_SECS", "-5"),
            ("HISTORY_SCOPE", "everyone"),
            ("CATALOG_PATH", "  "),
        ]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.session_ttl, Duration::from_secs(604_800));
        assert_eq!(config.history_scope, HistoryScope::Session);
        assert!(config.catalog_path.is_none());
    }
}
