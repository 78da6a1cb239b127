use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{AgentError, AgentResult};

pub const STEP_TAGS: [&str; 5] = ["START", "PLAN", "TOOL", "OBSERVE", "OUTPUT"];

/// One Chain-of-Thought step produced by a single model call
///
/// Serializes to the flat wire shape `{"step": "PLAN", "content": ...}` so that the
/// model sees its own earlier steps exactly as it emitted them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "UPPERCASE")]
pub enum StructuredStep {
    Start {
        content: String,
    },
    Plan {
        content: String,
    },
    Tool {
        content: String,
        function: String,
        input: String,
    },
    Observe {
        content: String,
    },
    Output {
        content: String,
    },
}

/// The schema constraint sent along with every completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    pub name: String,
    pub schema: Value,
}

/// The record appended as a developer message after a tool runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub step: String,
    pub function: String,
    pub input: String,
    pub output: String,
}

impl Observation {
    pub fn new<F, I, O>(function: F, input: I, output: O) -> Self
    where
        F: Into<String>,
        I: Into<String>,
        O: Into<String>,
    {
        Self {
            step: "OBSERVE".to_string(),
            function: function.into(),
            input: input.into(),
            output: output.into(),
        }
    }
}

// Loose wire shape; validated into a StructuredStep
#[derive(Debug, Deserialize)]
struct RawStep {
    step: Option<String>,
    content: Option<String>,
    #[serde(alias = "tool")]
    function: Option<String>,
    input: Option<String>,
}

impl StructuredStep {
    /// Parse the content of a model response into a step
    ///
    /// Malformed JSON and missing fields are schema violations. A well-formed record
    /// whose tag is not one of [`STEP_TAGS`] is reported as an unrecognized step.
    pub fn parse(raw: &str) -> AgentResult<Self> {
        let body = strip_code_fence(raw);
        if body.is_empty() {
            return Err(AgentError::SchemaValidation(
                "empty response content".to_string(),
            ));
        }

        let raw_step: RawStep = serde_json::from_str(body)
            .map_err(|e| AgentError::SchemaValidation(format!("{}: {}", e, body)))?;

        let tag = raw_step
            .step
            .as_deref()
            .map(|s| s.trim().to_uppercase())
            .ok_or_else(|| AgentError::SchemaValidation("missing field `step`".to_string()))?;
        let content = raw_step.content.unwrap_or_default();

        match tag.as_str() {
            "START" => Ok(StructuredStep::Start { content }),
            "PLAN" => Ok(StructuredStep::Plan { content }),
            "OBSERVE" => Ok(StructuredStep::Observe { content }),
            "OUTPUT" => {
                if content.trim().is_empty() {
                    return Err(AgentError::SchemaValidation(
                        "OUTPUT step has no content".to_string(),
                    ));
                }
                Ok(StructuredStep::Output { content })
            }
            "TOOL" => {
                let function = raw_step.function.ok_or_else(|| {
                    AgentError::SchemaValidation("TOOL step is missing `function`".to_string())
                })?;
                let input = raw_step.input.ok_or_else(|| {
                    AgentError::SchemaValidation("TOOL step is missing `input`".to_string())
                })?;
                Ok(StructuredStep::Tool {
                    content,
                    function,
                    input,
                })
            }
            _ => Err(AgentError::UnrecognizedStep(tag)),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            StructuredStep::Start { .. } => "START",
            StructuredStep::Plan { .. } => "PLAN",
            StructuredStep::Tool { .. } => "TOOL",
            StructuredStep::Observe { .. } => "OBSERVE",
            StructuredStep::Output { .. } => "OUTPUT",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            StructuredStep::Start { content }
            | StructuredStep::Plan { content }
            | StructuredStep::Tool { content, .. }
            | StructuredStep::Observe { content }
            | StructuredStep::Output { content } => content,
        }
    }

    /// JSON schema describing the flat step record
    pub fn response_format() -> ResponseFormat {
        ResponseFormat {
            name: "StructuredStep".to_string(),
            schema: json!({
                "type": "object",
                "properties": {
                    "step": {
                        "type": "string",
                        "enum": STEP_TAGS,
                        "description": "START | PLAN | TOOL | OBSERVE | OUTPUT"
                    },
                    "content": {
                        "type": "string",
                        "description": "The text of this step"
                    },
                    "function": {
                        "type": "string",
                        "description": "Name of the tool to call, only for TOOL steps"
                    },
                    "input": {
                        "type": "string",
                        "description": "Argument for the tool, only for TOOL steps"
                    }
                },
                "required": ["step"]
            }),
        }
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
    {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan() {
        let step = StructuredStep::parse(r#"{"step": "PLAN", "content": "look up sci-fi"}"#).unwrap();
        assert_eq!(
            step,
            StructuredStep::Plan {
                content: "look up sci-fi".to_string()
            }
        );
        assert_eq!(step.tag(), "PLAN");
    }

    #[test]
    fn test_parse_tool_accepts_tool_alias() {
        let step = StructuredStep::parse(
            r#"{"step": "TOOL", "tool": "fetch_movie_metadata", "input": "sci-fi"}"#,
        )
        .unwrap();
        assert_eq!(
            step,
            StructuredStep::Tool {
                content: String::new(),
                function: "fetch_movie_metadata".to_string(),
                input: "sci-fi".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_tag_is_case_insensitive() {
        let step = StructuredStep::parse(r#"{"step": " output ", "content": "Watch it"}"#).unwrap();
        assert_eq!(step.tag(), "OUTPUT");
        assert_eq!(step.content(), "Watch it");
    }

    #[test]
    fn test_parse_strips_code_fence() {
        let raw = "```json\n{\"step\": \"START\", \"content\": \"hi\"}\n```";
        assert_eq!(StructuredStep::parse(raw).unwrap().tag(), "START");
    }

    #[test]
    fn test_unknown_tag_is_unrecognized() {
        let err = StructuredStep::parse(r#"{"step": "REFLECT", "content": "hmm"}"#).unwrap_err();
        assert_eq!(err, AgentError::UnrecognizedStep("REFLECT".to_string()));
    }

    #[test]
    fn test_schema_violations() {
        for raw in [
            "",
            "not json",
            r#"{"content": "no tag"}"#,
            r#"{"step": "TOOL", "input": "sci-fi"}"#,
            r#"{"step": "TOOL", "function": "fetch_movie_metadata"}"#,
            r#"{"step": "OUTPUT", "content": "   "}"#,
        ] {
            let err = StructuredStep::parse(raw).unwrap_err();
            assert!(
                matches!(err, AgentError::SchemaValidation(_)),
                "expected schema error for {:?}, got {:?}",
                raw,
                err
            );
        }
    }

    #[test]
    fn test_serializes_flat() {
        let step = StructuredStep::Tool {
            content: "fetching".to_string(),
            function: "fetch_movie_metadata".to_string(),
            input: "action".to_string(),
        };
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(
            value,
            json!({
                "step": "TOOL",
                "content": "fetching",
                "function": "fetch_movie_metadata",
                "input": "action"
            })
        );
        let reparsed = StructuredStep::parse(&value.to_string()).unwrap();
        assert_eq!(reparsed, step);
    }

    #[test]
    fn test_response_format_lists_all_tags() {
        let format = StructuredStep::response_format();
        assert_eq!(format.name, "StructuredStep");
        assert_eq!(format.schema["properties"]["step"]["enum"], json!(STEP_TAGS));
    }
}
