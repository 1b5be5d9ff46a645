use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::test_case::UnrecognizedPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "caseforge.toml";
pub const CONFIG_PATH_ENV: &str = "CASEFORGE_CONFIG";
pub const ENV_PREFIX: &str = "CASEFORGE_";
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    pub unrecognized_policy: UnrecognizedPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub storage: StorageConfig,
    pub parser: ParserConfig,
}

pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    /// Defaults, then the TOML file, then `CASEFORGE_*` variables
    /// (`CASEFORGE_LLM__MODEL` sets `llm.model`).
    pub fn new() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }

        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        Self::from_figment(
            Figment::from(Serialized::defaults(AppConfig::default()))
                .merge(Toml::file(config_path))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn load(&self) -> Result<AppConfig> {
        let mut config: AppConfig = self
            .figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load configuration: {}", e)))?;

        if config.llm.api_key.is_none() {
            config.llm.api_key = std::env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty());
        }

        validate(&config)?;

        info!(
            host = %config.server.host,
            port = config.server.port,
            model = %config.llm.model,
            data_dir = %config.storage.data_dir.display(),
            api_key_set = config.llm.api_key.is_some(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(config: &AppConfig) -> Result<()> {
    if config.llm.model.trim().is_empty() {
        return Err(AppError::ConfigError("llm.model must not be empty".to_string()));
    }
    if !config.llm.base_url.starts_with("http://") && !config.llm.base_url.starts_with("https://") {
        return Err(AppError::ConfigError(format!(
            "llm.base_url must be an http(s) URL, got '{}'",
            config.llm.base_url
        )));
    }
    if let Some(temperature) = config.llm.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(AppError::ConfigError(format!(
                "llm.temperature must be within 0.0..=2.0, got {}",
                temperature
            )));
        }
    }
    Ok(())
}
