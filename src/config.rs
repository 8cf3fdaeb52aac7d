use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use runroom_core::{ApiClient, ApiError};

/// Base URL used when neither the config file nor the environment set one.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// `api` section of the config file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApiSection {
    /// Base URL of the running room API (e.g., "https://rr.example.org/api")
    pub base_url: Option<String>,
    /// Bearer token obtained at login
    pub token: Option<String>,
    /// Request timeout in seconds (unset: no explicit timeout)
    pub timeout_secs: Option<u64>,
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the running room API
    pub api_url: ConfigValue<String>,
    /// Bearer token; never printed
    #[serde(skip_serializing)]
    pub api_token: ConfigValue<Option<String>>,
    /// Request timeout in seconds
    pub timeout_secs: ConfigValue<Option<u64>>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    api: Option<ApiSection>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut api_url = ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default);
        let mut api_token = ConfigValue::new(None, ConfigSource::Default);
        let mut timeout_secs = ConfigValue::new(None, ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            let api = file_config.api.unwrap_or_default();
            if let Some(url) = api.base_url {
                api_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(token) = api.token {
                api_token = ConfigValue::new(Some(token), ConfigSource::File);
            }
            if let Some(secs) = api.timeout_secs {
                timeout_secs = ConfigValue::new(Some(secs), ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("RUNROOM_API_URL") {
            api_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(token) = std::env::var("RUNROOM_API_TOKEN") {
            api_token = ConfigValue::new(Some(token), ConfigSource::Environment);
        }
        if let Ok(secs) = std::env::var("RUNROOM_API_TIMEOUT") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnv("RUNROOM_API_TIMEOUT", secs.clone()))?;
            timeout_secs = ConfigValue::new(Some(secs), ConfigSource::Environment);
        }

        Ok(Self {
            api_url,
            api_token,
            timeout_secs,
            config_file,
        })
    }

    /// Builds the API client described by this configuration.
    pub fn client(&self) -> Result<ApiClient, ApiError> {
        ApiClient::new(
            self.api_url.value.clone(),
            self.api_token.value.clone(),
            self.timeout_secs.value.map(Duration::from_secs),
        )
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/runroom/
    /// - macOS: ~/Library/Application Support/runroom/
    /// - Windows: %APPDATA%/runroom/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("runroom")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidEnv(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidEnv(name, value) => {
                write!(f, "Invalid value '{}' for {}", value, name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.api_url.value, DEFAULT_API_URL);
        assert_eq!(config.api_url.source, ConfigSource::Default);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api:").unwrap();
        writeln!(file, "  base_url: https://rr.example.org/api").unwrap();
        writeln!(file, "  token: abc123").unwrap();
        writeln!(file, "  timeout_secs: 15").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.api_url.value, "https://rr.example.org/api");
        assert_eq!(config.api_url.source, ConfigSource::File);
        assert_eq!(config.api_token.value.as_deref(), Some("abc123"));
        assert_eq!(config.timeout_secs.value, Some(15));
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_token_is_not_serialized() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api:").unwrap();
        writeln!(file, "  token: very-secret").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("very-secret"));
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api:").unwrap();
        writeln!(file, "  base_url: http://fromfile").unwrap();

        // Set env var
        std::env::set_var("RUNROOM_API_URL", "http://fromenv");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.api_url.value, "http://fromenv");
        assert_eq!(config.api_url.source, ConfigSource::Environment);

        // Clean up
        std::env::remove_var("RUNROOM_API_URL");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_partial_file_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api:").unwrap();
        writeln!(file, "  timeout_secs: 5").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.api_url.source, ConfigSource::Default);
        assert_eq!(config.timeout_secs.source, ConfigSource::File);
        assert!(config.api_token.value.is_none());
    }

    #[test]
    fn test_client_uses_configured_url() {
        let temp_dir = tempdir().unwrap();
        let config = Config::load(Some(temp_dir.path().join("none.yaml"))).unwrap();
        let client = config.client().unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_URL);
    }
}
