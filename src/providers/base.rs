use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::message::Message;
use crate::models::step::ResponseFormat;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }

    /// Accumulate another call's usage, treating missing counts as absent rather than zero
    pub fn add(&mut self, other: &Usage) {
        fn sum(a: Option<i32>, b: Option<i32>) -> Option<i32> {
            match (a, b) {
                (Some(a), Some(b)) => Some(a + b),
                (a, b) => a.or(b),
            }
        }
        self.input_tokens = sum(self.input_tokens, other.input_tokens);
        self.output_tokens = sum(self.output_tokens, other.output_tokens);
        self.total_tokens = sum(self.total_tokens, other.total_tokens);
    }
}

/// Base trait for chat-completion backends
pub trait Provider: Send + Sync {
    /// Generate the next assistant message, constrained to the given response format
    fn complete(
        &self,
        system: &str,
        messages: &[Message],
        response_format: &ResponseFormat,
    ) -> Result<(Message, Usage)>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_usage_creation() {
        let usage = Usage::new(Some(10), Some(20), Some(30));
        assert_eq!(usage.input_tokens, Some(10));
        assert_eq!(usage.output_tokens, Some(20));
        assert_eq!(usage.total_tokens, Some(30));
    }

    #[test]
    fn test_usage_add() {
        let mut total = Usage::default();
        total.add(&Usage::new(Some(10), Some(5), Some(15)));
        total.add(&Usage::new(Some(7), None, None));
        assert_eq!(total, Usage::new(Some(17), Some(5), Some(15)));
    }

    #[test]
    fn test_usage_serialization() -> Result<()> {
        let usage = Usage::new(Some(10), Some(20), Some(30));
        let json_value = serde_json::to_value(&usage)?;
        assert_eq!(json_value["input_tokens"], json!(10));
        assert_eq!(json_value["output_tokens"], json!(20));
        assert_eq!(json_value["total_tokens"], json!(30));
        Ok(())
    }
}
