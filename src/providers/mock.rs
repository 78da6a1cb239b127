use anyhow::{anyhow, Result};
use std::sync::Arc;
use std::sync::Mutex;

use crate::models::message::Message;
use crate::models::step::ResponseFormat;
use crate::providers::base::{Provider, Usage};

/// A mock provider that returns pre-configured responses for testing
///
/// Every request's message list is recorded so tests can inspect what was resent. Clones
/// share the same script and request log.
#[derive(Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of response contents
    pub fn new<S: Into<String>>(responses: Vec<S>) -> Self {
        Self::with_results(responses.into_iter().map(|r| Ok(r.into())).collect())
    }

    /// Create a mock where some calls fail with the given error text
    pub fn with_results(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }
}

impl Provider for MockProvider {
    fn complete(
        &self,
        _system: &str,
        messages: &[Message],
        _response_format: &ResponseFormat,
    ) -> Result<(Message, Usage)> {
        self.requests.lock().unwrap().push(messages.to_vec());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(anyhow!("MockProvider has no more responses"));
        }
        match responses.remove(0) {
            Ok(content) => Ok((
                Message::assistant(content),
                Usage::new(Some(10), Some(5), Some(15)),
            )),
            Err(e) => Err(anyhow!(e)),
        }
    }
}
