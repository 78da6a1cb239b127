use anyhow::Result;
use mre::agent::Agent;
use mre::conversation::Conversation;

use crate::prompt::{InputType, Prompt};

pub struct Session<'a> {
    agent: Agent,
    prompt: Box<dyn Prompt + 'a>,
    conversation: Conversation,
}

impl<'a> Session<'a> {
    pub fn new(agent: Agent, prompt: Box<dyn Prompt + 'a>) -> Self {
        Session {
            agent,
            prompt,
            conversation: Conversation::new(),
        }
    }

    pub fn start(&mut self) -> Result<()> {
        self.prompt.mre_ready();

        loop {
            let input = self.prompt.get_input()?;
            match input.input_type {
                InputType::Message => {
                    if let Some(content) = input.content {
                        self.process_turn(&content);
                    }
                }
                InputType::Clear => {
                    self.conversation.clear();
                    self.prompt.render_notice("Recommendations cleared.");
                }
                InputType::Exit => break,
                InputType::AskAgain => continue,
            }
        }

        self.prompt.close();
        Ok(())
    }

    /// Run a single turn without the input loop; errors are returned instead of rendered
    pub fn headless_start(&mut self, query: &str) -> Result<()> {
        self.prompt.show_busy();
        let result = self.agent.reply(&mut self.conversation, query);
        self.prompt.hide_busy();

        let reply = result?;
        self.prompt.render_reply(&reply);
        self.prompt.close();
        Ok(())
    }

    fn process_turn(&mut self, query: &str) {
        self.prompt.show_busy();
        let result = self.agent.reply(&mut self.conversation, query);
        self.prompt.hide_busy();

        match result {
            Ok(reply) => self.prompt.render_reply(&reply),
            Err(e) => self.prompt.render_error(&e),
        }
    }
}
