use anyhow::Result;
use mre::agent::Reply;
use mre::errors::AgentError;

pub mod cliclack;

pub trait Prompt {
    fn render_reply(&mut self, reply: &Reply);
    fn render_error(&mut self, error: &AgentError);
    fn render_notice(&mut self, text: &str);
    fn get_input(&mut self) -> Result<Input>;
    fn show_busy(&mut self);
    fn hide_busy(&mut self);
    fn close(&self);
    fn mre_ready(&self) {
        println!("🎬 Movie Recommendation Engine (MRE) 🍿");
        println!("Utilizing Chain-of-Thought reasoning to find your movie match.");
        println!("Example: 'Suggest a sci-fi movie under 150 minutes.'\n");
    }
}

pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>, // Only set for messages
}

#[derive(Debug, PartialEq)]
pub enum InputType {
    AskAgain, // Ask the user for input again. Control flow command.
    Message,  // User sent a message
    Clear,    // Reset the conversation
    Exit,     // User wants to exit the session
}

pub enum Theme {
    Light,
    Dark,
}
