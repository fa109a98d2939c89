use serde::Deserialize;
use std::path::Path;
use tracing::error;

const DEFAULT_PORT: u16 = 8080;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

// ─── TOML config file ─────────────────────────────────────────────────────────

/// Optional TOML config file passed via `--config` / `TASKD_CONFIG`.
/// All fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// HTTP server port (default: 8080).
    port: Option<u16>,
    /// Bind address (default: "127.0.0.1"; use "0.0.0.0" for LAN access).
    bind_address: Option<String>,
    /// Log level filter string, e.g. "debug", "info,taskd=trace" (default: "info").
    log: Option<String>,
    /// Log output format: "pretty" (default, human-readable) | "json" (structured for log aggregators).
    log_format: Option<String>,
    /// Shared secret required in the G-C-P-KEY header. None = auth disabled.
    api_key: Option<String>,
}

fn load_toml(path: &Path) -> Option<TomlConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config file, using defaults");
            None
        }
    }
}

// ─── ServerConfig ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Bind address for the HTTP server (TASKD_BIND env var, default: "127.0.0.1").
    pub bind_address: String,
    pub log: String,
    /// Log output format: "pretty" (default) | "json".
    pub log_format: String,
    /// Shared secret clients must present in the G-C-P-KEY header on
    /// protected routes (TASKD_API_KEY env var or `api_key` in the config file).
    /// None = authentication disabled (local, trusted use only).
    pub api_key: Option<String>,
}

impl ServerConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env, passed as `Some(value)` from clap
    ///   2. TOML file given via `--config`
    ///   3. Built-in defaults
    pub fn new(
        port: Option<u16>,
        bind_address: Option<String>,
        log: Option<String>,
        api_key: Option<String>,
        config_path: Option<&Path>,
    ) -> Self {
        // Load TOML as the lowest-priority override layer
        let toml = config_path.and_then(load_toml).unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);

        let bind_address = bind_address
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);

        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());

        let log_format = std::env::var("TASKD_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        let api_key = api_key.filter(|s| !s.is_empty()).or(toml.api_key);

        Self {
            port,
            bind_address,
            log,
            log_format,
            api_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_nothing_given() {
        let config = ServerConfig::new(None, None, None, None, None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.log, "info");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "port = 9000\nbind_address = \"0.0.0.0\"\napi_key = \"secret\""
        )
        .unwrap();

        let config = ServerConfig::new(None, None, None, None, Some(file.path()));
        assert_eq!(config.port, 9000);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        // Untouched fields keep their defaults
        assert_eq!(config.log, "info");
    }

    #[test]
    fn test_cli_beats_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 9000\napi_key = \"from-toml\"").unwrap();

        let config = ServerConfig::new(
            Some(7000),
            None,
            None,
            Some("from-cli".to_string()),
            Some(file.path()),
        );
        assert_eq!(config.port, 7000);
        assert_eq!(config.api_key.as_deref(), Some("from-cli"));
    }

    #[test]
    fn test_malformed_toml_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();

        let config = ServerConfig::new(None, None, None, None, Some(file.path()));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_empty_cli_key_defers_to_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"from-toml\"").unwrap();

        let config = ServerConfig::new(
            None,
            None,
            None,
            Some(String::new()),
            Some(file.path()),
        );
        assert_eq!(config.api_key.as_deref(), Some("from-toml"));
    }
}
