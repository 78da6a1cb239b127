use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::providers::configs::{
    OpenAiProviderConfig, DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const ENV_PREFIX: &str = "MRE";
pub const DEFAULT_MAX_STEPS: usize = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing API key: set {env_var}, MRE_PROVIDER__API_KEY, provider.api_key in the secrets file, or pass --api-key")]
    MissingCredential { env_var: String },

    #[error("Invalid setting: {0}")]
    Invalid(String),

    #[error(transparent)]
    Other(#[from] config::ConfigError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentSettings {
    /// Upper bound on model calls within one turn
    pub max_steps: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Values passed on the command line; they win over every other source
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub max_steps: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub provider: OpenAiProviderConfig,
    pub agent: AgentSettings,
}

#[derive(Debug, Deserialize)]
struct RawProvider {
    host: String,
    #[serde(default)]
    api_key: Option<String>,
    model: String,
    #[serde(default)]
    temperature: Option<f32>,
    #[serde(default)]
    max_tokens: Option<i32>,
    timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct RawAgent {
    max_steps: usize,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    provider: RawProvider,
    agent: RawAgent,
}

/// Read `GEMINI_API_KEY = "..."` from the root table of a secrets file
fn top_level_api_key(path: &Path) -> Result<Option<String>, ConfigError> {
    let file = Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .build()?;
    let lowercase = API_KEY_ENV.to_lowercase();
    Ok([API_KEY_ENV, lowercase.as_str()]
        .iter()
        .find_map(|key| file.get_string(key).ok()))
}

impl Settings {
    /// Build settings from defaults, the optional secrets file, the environment and overrides
    ///
    /// Fails with [`ConfigError::MissingCredential`] when no non-blank API key is found, so
    /// callers can stop before any provider is constructed.
    pub fn load(secrets_file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("provider.host", DEFAULT_HOST)?
            .set_default("provider.model", DEFAULT_MODEL)?
            .set_default("provider.timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("agent.max_steps", DEFAULT_MAX_STEPS as u64)?;

        if let Some(path) = secrets_file {
            tracing::debug!(path = %path.display(), "reading secrets file");
            // A top-level key in a Streamlit-style secrets file is the weakest credential source
            if let Some(key) = top_level_api_key(path)? {
                builder = builder.set_default("provider.api_key", key)?;
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("provider.api_key", std::env::var(API_KEY_ENV).ok())?
            .set_override_option("provider.api_key", overrides.api_key.clone())?
            .set_override_option("provider.model", overrides.model.clone())?
            .set_override_option("agent.max_steps", overrides.max_steps.map(|n| n as u64))?
            .build()?;

        let raw: RawSettings = config.try_deserialize()?;
        Self::validate(raw)
    }

    fn validate(raw: RawSettings) -> Result<Self, ConfigError> {
        let api_key = raw
            .provider
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingCredential {
                env_var: API_KEY_ENV.to_string(),
            })?;

        if raw.agent.max_steps == 0 {
            return Err(ConfigError::Invalid(
                "agent.max_steps must be at least 1".to_string(),
            ));
        }

        Ok(Settings {
            provider: OpenAiProviderConfig {
                host: raw.provider.host,
                api_key,
                model: raw.provider.model,
                temperature: raw.provider.temperature,
                max_tokens: raw.provider.max_tokens,
                timeout_secs: raw.provider.timeout_secs,
            },
            agent: AgentSettings {
                max_steps: raw.agent.max_steps,
            },
        })
    }
}
