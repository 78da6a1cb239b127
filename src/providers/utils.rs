use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use crate::models::message::Message;
use crate::models::step::ResponseFormat;

/// Convert internal Message format to OpenAI's API message specification
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            json!({
                "role": message.role,
                "content": message.content,
            })
        })
        .collect()
}

/// Wrap a schema as an OpenAI `json_schema` response format
pub fn response_format_to_openai_spec(format: &ResponseFormat) -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": format.name,
            "schema": format.schema,
        }
    })
}

/// Convert OpenAI's API response to internal Message format
///
/// A null content (refusals, empty generations) becomes an empty assistant message so that
/// it fails schema validation downstream instead of looking like a transport error.
pub fn openai_response_to_message(response: &Value) -> Result<Message> {
    let original = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| anyhow!("Response has no choices: {}", response))?;

    let text = original
        .get("content")
        .and_then(|content| content.as_str())
        .unwrap_or_default();

    Ok(Message::assistant(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::Role;
    use crate::models::step::StructuredStep;

    #[test]
    fn test_messages_to_openai_spec() {
        let messages = vec![
            Message::user("Suggest a sci-fi movie"),
            Message::assistant(r#"{"step":"PLAN","content":"look it up"}"#),
            Message::developer(r#"{"step":"OBSERVE"}"#),
        ];
        let spec = messages_to_openai_spec(&messages);
        assert_eq!(
            spec,
            vec![
                json!({"role": "user", "content": "Suggest a sci-fi movie"}),
                json!({"role": "assistant", "content": r#"{"step":"PLAN","content":"look it up"}"#}),
                json!({"role": "developer", "content": r#"{"step":"OBSERVE"}"#}),
            ]
        );
    }

    #[test]
    fn test_response_format_spec() {
        let spec = response_format_to_openai_spec(&StructuredStep::response_format());
        assert_eq!(spec["type"], "json_schema");
        assert_eq!(spec["json_schema"]["name"], "StructuredStep");
        assert_eq!(spec["json_schema"]["schema"]["type"], "object");
        // only `step` is required, which strict mode would reject
        assert!(spec["json_schema"].get("strict").is_none());
    }

    #[test]
    fn test_response_to_message() -> Result<()> {
        let response = json!({
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "{\"step\":\"START\"}"},
                "finish_reason": "stop"
            }]
        });
        let message = openai_response_to_message(&response)?;
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.text(), "{\"step\":\"START\"}");
        Ok(())
    }

    #[test]
    fn test_null_content_becomes_empty() -> Result<()> {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": null, "refusal": "no"}}]
        });
        assert_eq!(openai_response_to_message(&response)?.text(), "");
        Ok(())
    }

    #[test]
    fn test_missing_choices_is_error() {
        assert!(openai_response_to_message(&json!({"choices": []})).is_err());
        assert!(openai_response_to_message(&json!({})).is_err());
    }
}
