use std::time::Duration;

pub const DEFAULT_HOST: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Settings for any endpoint speaking the OpenAI chat-completions protocol
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiProviderConfig {
    /// Base URL including the API version, `/chat/completions` is appended
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
    pub timeout_secs: u64,
}

impl OpenAiProviderConfig {
    pub fn new<K: Into<String>>(api_key: K) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            max_tokens: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
