use serde::Deserialize;
use std::env;
use wayfare_shared::Masked;

pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const SERP_API_KEY: &str = "SERP_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub secrets: SecretsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

fn default_host() -> String { "0.0.0.0".to_string() }

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    /// Unset means the client never gives up; the backend owns timeouts.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default = "default_complete_path")]
    pub complete_path: String,
    #[serde(default = "default_flights_path")]
    pub flights_path: String,
    #[serde(default = "default_hotels_path")]
    pub hotels_path: String,
}

fn default_complete_path() -> String { "/search/complete".to_string() }
fn default_flights_path() -> String { "/search/flights".to_string() }
fn default_hotels_path() -> String { "/search/hotels".to_string() }

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: None,
            complete_path: default_complete_path(),
            flights_path: default_flights_path(),
            hotels_path: default_hotels_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SecretsConfig {
    pub google_api_key: Option<Masked<String>>,
    pub serp_api_key: Option<Masked<String>>,
}

impl SecretsConfig {
    /// Secrets file values win; the process environment fills the gaps.
    pub fn resolve(self) -> Self {
        Self {
            google_api_key: self.google_api_key.or_else(|| Masked::from_env(GOOGLE_API_KEY)),
            serp_api_key: self.serp_api_key.or_else(|| Masked::from_env(SERP_API_KEY)),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Hosted secrets, not checked in
            .add_source(config::File::with_name("config/secrets").required(false))
            // Eg.. `WAYFARE__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("WAYFARE").separator("__"))
            .build()?;

        let mut config: Config = s.try_deserialize()?;
        config.secrets = config.secrets.resolve();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn test_config_deserialization_with_defaults() {
        let toml = r#"
            [server]
            port = 8501

            [backend]
            base_url = "http://localhost:8000"

            [secrets]
            serp_api_key = "serp-from-file"
        "#;
        let config: Config = config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.backend.flights_path, "/search/flights");
        assert_eq!(config.backend.timeout_seconds, None);
        assert_eq!(config.secrets.serp_api_key.unwrap().expose(), "serp-from-file");
        assert!(config.secrets.google_api_key.is_none());
    }

    #[test]
    fn test_secrets_file_value_wins_over_environment() {
        let secrets = SecretsConfig {
            google_api_key: Some(Masked::new("from-file".to_string())),
            serp_api_key: None,
        }
        .resolve();
        assert_eq!(secrets.google_api_key.unwrap().expose(), "from-file");
    }
}
