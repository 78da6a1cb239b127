use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, info_span, warn};

use crate::config::AgentSettings;
use crate::conversation::Conversation;
use crate::errors::{AgentError, AgentResult};
use crate::models::message::Message;
use crate::models::step::{Observation, ResponseFormat, StructuredStep};
use crate::prompt_template::system_prompt;
use crate::providers::base::{Provider, Usage};
use crate::tools::ToolRegistry;

lazy_static! {
    static ref FUNCTION_NAME: Regex = Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Outcome of one successful turn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    /// Content of the OUTPUT step that ended the turn
    pub answer: String,
    /// Every step the model produced, in order, ending with the OUTPUT step
    pub steps: Vec<StructuredStep>,
    pub observations: Vec<Observation>,
    pub model_calls: usize,
    pub usage: Usage,
}

/// Agent drives the Chain-of-Thought loop between the model and the local tools
pub struct Agent {
    provider: Box<dyn Provider>,
    tools: ToolRegistry,
    settings: AgentSettings,
    system_prompt: String,
    response_format: ResponseFormat,
}

impl Agent {
    pub fn new(
        provider: Box<dyn Provider>,
        tools: ToolRegistry,
        settings: AgentSettings,
    ) -> AgentResult<Self> {
        let system_prompt = system_prompt(&tools, settings.max_steps)
            .map_err(|e| AgentError::Configuration(format!("system prompt: {}", e)))?;

        Ok(Self {
            provider,
            tools,
            settings,
            system_prompt,
            response_format: StructuredStep::response_format(),
        })
    }

    /// Run one user turn to completion
    ///
    /// Appends the query, then calls the model until it produces an OUTPUT step. Every
    /// model response is appended as an assistant message and every tool run as a developer
    /// observation, so on success the conversation grows by `1 + model_calls + observations`.
    /// Any error aborts the turn; messages appended so far stay in the conversation.
    pub fn reply(&self, conversation: &mut Conversation, query: &str) -> AgentResult<Reply> {
        let span = info_span!("turn", conversation = %conversation.id());
        let _guard = span.enter();

        info!(max_steps = self.settings.max_steps, "starting turn");
        let result = self.run_turn(conversation, query);
        match &result {
            Ok(reply) => info!(
                model_calls = reply.model_calls,
                observations = reply.observations.len(),
                total_tokens = ?reply.usage.total_tokens,
                "turn finished"
            ),
            Err(e) => warn!(error = %e, "turn aborted"),
        }
        result
    }

    fn run_turn(&self, conversation: &mut Conversation, query: &str) -> AgentResult<Reply> {
        conversation.push(Message::user(query));
        let mut reply = Reply::default();

        for _ in 0..self.settings.max_steps {
            let (response, usage) = self
                .provider
                .complete(
                    &self.system_prompt,
                    conversation.messages(),
                    &self.response_format,
                )
                .map_err(|e| AgentError::RemoteCall(format!("{:#}", e)))?;
            reply.model_calls += 1;
            reply.usage.add(&usage);

            let step = StructuredStep::parse(response.text());
            conversation.push(response);
            let step = step?;
            debug!(step = step.tag(), content = %step.content(), "model step");
            reply.steps.push(step.clone());

            match step {
                StructuredStep::Start { .. }
                | StructuredStep::Plan { .. }
                | StructuredStep::Observe { .. } => continue,
                StructuredStep::Tool {
                    function, input, ..
                } => {
                    let observation = self.dispatch_tool_call(&function, &input)?;
                    let record = serde_json::to_string(&observation)
                        .map_err(|e| AgentError::ToolExecution(e.to_string()))?;
                    conversation.push(Message::developer(record));
                    reply.observations.push(observation);
                }
                StructuredStep::Output { content } => {
                    reply.answer = content;
                    return Ok(reply);
                }
            }
        }

        Err(AgentError::StepLimitExceeded(self.settings.max_steps))
    }

    /// Run a single tool named by a TOOL step
    fn dispatch_tool_call(&self, function: &str, input: &str) -> AgentResult<Observation> {
        if !FUNCTION_NAME.is_match(function) {
            return Err(AgentError::UnrecognizedStep(format!(
                "TOOL step function name '{}' must match [a-zA-Z0-9_-]+",
                function
            )));
        }

        debug!(function, input, "calling tool");
        let output = self.tools.call(function, input)?;
        Ok(Observation::new(function, input, output))
    }
}
