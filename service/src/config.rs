use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_vec_from_string_or_vec;

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with MC_ prefix (always wins)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub fixtures: FixturesConfig,
    #[serde(default)]
    pub swagger: SwaggerConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// HTTP server bind address.
    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log filter directive (e.g. "info", "memoria_civica_api=debug,tower_http=info").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests.
    /// Use `"*"` to allow any origin.
    /// Accepts either an array or comma-separated string.
    /// Example: `["http://localhost:3000"]` or `"http://localhost:3000,https://memoriacivica.org"`
    #[serde(
        default = "default_allowed_origins",
        deserialize_with = "deserialize_origins"
    )]
    pub allowed_origins: Vec<String>,
}

/// Deserialize origins from comma-separated string or array, filtering empty values.
fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let origins: Vec<String> = deserialize_vec_from_string_or_vec(deserializer)?;
    Ok(origins.into_iter().filter(|s| !s.is_empty()).collect())
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixturesConfig {
    /// Seed for the deterministic fixture generator.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Maximum number of votações whose generated votes are kept in memory.
    #[serde(default = "default_votos_cache_capacity")]
    pub votos_cache_capacity: u64,

    /// Seconds a cached vote set lives before it is regenerated.
    #[serde(default = "default_votos_cache_ttl_secs")]
    pub votos_cache_ttl_secs: u64,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            votos_cache_capacity: default_votos_cache_capacity(),
            votos_cache_ttl_secs: default_votos_cache_ttl_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SwaggerConfig {
    /// Enable Swagger UI at /swagger-ui.
    /// Enable in development via `MC_SWAGGER__ENABLED=true`
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// API base URL used by the `memoria` CLI.
    #[serde(default = "default_client_base_url")]
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_client_base_url(),
        }
    }
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_allowed_origins() -> Vec<String> {
    // The PWA dev server
    vec!["http://localhost:3000".to_string()]
}

#[allow(clippy::missing_const_for_fn)]
fn default_seed() -> u64 {
    2024
}

#[allow(clippy::missing_const_for_fn)]
fn default_votos_cache_capacity() -> u64 {
    64
}

#[allow(clippy::missing_const_for_fn)]
fn default_votos_cache_ttl_secs() -> u64 {
    3600
}

fn default_client_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("MC_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port cannot be 0".into()));
        }

        if self.fixtures.votos_cache_capacity == 0 {
            return Err(ConfigError::Validation(
                "fixtures.votos_cache_capacity cannot be 0".into(),
            ));
        }

        if self.fixtures.votos_cache_ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "fixtures.votos_cache_ttl_secs cannot be 0".into(),
            ));
        }

        for origin in &self.cors.allowed_origins {
            if origin != "*" && !is_http_url(origin) {
                return Err(ConfigError::Validation(format!(
                    "cors.allowed_origins contains invalid origin '{origin}'. Must be '*' or start with http:// or https://"
                )));
            }
        }

        if !is_http_url(&self.client.base_url) {
            return Err(ConfigError::Validation(format!(
                "client.base_url must start with http:// or https://, got: '{}'",
                self.client.base_url
            )));
        }

        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
