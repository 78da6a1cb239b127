use anyhow::{anyhow, Result};
use reqwest::blocking::Client; // we are using blocking API here to make sync calls
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::base::{Provider, Usage};
use super::configs::OpenAiProviderConfig;
use super::utils::{
    messages_to_openai_spec, openai_response_to_message, response_format_to_openai_spec,
};
use crate::models::message::Message;
use crate::models::step::ResponseFormat;

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn get_usage(data: &Value) -> Usage {
        let Some(usage) = data.get("usage") else {
            return Usage::default();
        };

        let input_tokens = usage
            .get("prompt_tokens")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32);

        let output_tokens = usage
            .get("completion_tokens")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32);

        let total_tokens = usage
            .get("total_tokens")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32)
            .or_else(|| match (input_tokens, output_tokens) {
                (Some(input), Some(output)) => Some(input + output),
                _ => None,
            });

        Usage::new(input_tokens, output_tokens, total_tokens)
    }

    fn post(&self, payload: &Value) -> Result<Value> {
        let url = format!(
            "{}/chat/completions",
            self.config.host.trim_end_matches('/')
        );
        tracing::debug!(%url, model = %self.config.model, "sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(payload)
            .send()?;

        match response.status() {
            StatusCode::OK => Ok(response.json()?),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
                Err(anyhow!("Server error: {}", status))
            }
            status => {
                let body = response.text().unwrap_or_default();
                Err(anyhow!("Request failed: {}\n{}", status, body))
            }
        }
    }
}

impl Provider for OpenAiProvider {
    fn complete(
        &self,
        system: &str,
        messages: &[Message],
        response_format: &ResponseFormat,
    ) -> Result<(Message, Usage)> {
        let system_message = json!({
            "role": "system",
            "content": system
        });

        // create messages array with system message first
        let mut messages_array = vec![system_message];
        messages_array.extend(messages_to_openai_spec(messages));

        let mut payload = json!({
            "model": self.config.model,
            "messages": messages_array,
            "response_format": response_format_to_openai_spec(response_format),
        });

        if let Some(object) = payload.as_object_mut() {
            if let Some(temp) = self.config.temperature {
                object.insert("temperature".to_string(), json!(temp));
            }
            if let Some(tokens) = self.config.max_tokens {
                object.insert("max_tokens".to_string(), json!(tokens));
            }
        }

        let response = self.post(&payload)?;

        if let Some(error) = response.get("error") {
            return Err(anyhow!("OpenAI API error: {}", error));
        }

        let message = openai_response_to_message(&response)?;
        let usage = Self::get_usage(&response);

        Ok((message, usage))
    }
}
