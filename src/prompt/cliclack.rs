use std::io::{self, Write};

use anyhow::Result;
use bat::WrappingMode;
use cliclack::{input, spinner};
use console::style;
use mre::agent::Reply;
use mre::errors::AgentError;
use mre::models::step::StructuredStep;

use super::{Input, InputType, Prompt, Theme};

pub struct CliclackPrompt {
    spinner: Option<cliclack::ProgressBar>,
    show_steps: bool,
    theme: Theme,
}

impl CliclackPrompt {
    pub fn new(show_steps: bool) -> Self {
        CliclackPrompt {
            spinner: None,
            show_steps,
            theme: Theme::Dark,
        }
    }

    fn bat_theme(&self) -> &'static str {
        match self.theme {
            Theme::Light => "GitHub",
            Theme::Dark => "zenburn",
        }
    }
}

/// Map a line of user input to a command, `None` means it is a plain message
pub fn parse_command(text: &str) -> Option<Command> {
    match text.trim().to_lowercase().as_str() {
        "/exit" | "/quit" => Some(Command::Exit),
        "/clear" => Some(Command::Clear),
        "/steps" => Some(Command::ToggleSteps),
        "/t" => Some(Command::ToggleTheme),
        "/?" => Some(Command::Help),
        _ => None,
    }
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Exit,
    Clear,
    ToggleSteps,
    ToggleTheme,
    Help,
}

/// One-line label for an intermediate step
pub fn step_label(step: &StructuredStep) -> String {
    match step {
        StructuredStep::Start { content } => format!("🔥 MRE Initialized: {}", content),
        StructuredStep::Plan { content } => format!("🧠 Planning: {}", content),
        StructuredStep::Tool {
            function, input, ..
        } => format!("🛠️ Fetching data with {} using keyword: {}", function, input),
        StructuredStep::Observe { content } => format!("👀 Observing: {}", content),
        StructuredStep::Output { .. } => "🤖 MRE Recommendation:".to_string(),
    }
}

fn print(content: &str, theme: &str) {
    let printed = bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(theme)
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print();
    if printed.is_err() {
        println!("{}", content);
    }
}

fn print_step(step: &StructuredStep) {
    let label = step_label(step);
    let styled = match step {
        StructuredStep::Start { .. } => style(label).blue(),
        StructuredStep::Plan { .. } => style(label).green(),
        StructuredStep::Tool { .. } => style(label).yellow(),
        StructuredStep::Observe { .. } => style(label).cyan(),
        StructuredStep::Output { .. } => style(label).magenta().bold(),
    };
    println!("{}", styled);
}

impl Prompt for CliclackPrompt {
    fn render_reply(&mut self, reply: &Reply) {
        if self.show_steps {
            for step in &reply.steps {
                print_step(step);
            }
            println!(
                "{}",
                style(format!(
                    "{} model calls, {} tool observations",
                    reply.model_calls,
                    reply.observations.len()
                ))
                .dim()
            );
        } else if let Some(last) = reply.steps.last() {
            print_step(last);
        }

        print(&reply.answer, self.bat_theme());
        println!();
        let _ = io::stdout().flush();
    }

    fn render_error(&mut self, error: &AgentError) {
        println!("{} {}", style("Error:").red().bold(), error);
        println!();
    }

    fn render_notice(&mut self, text: &str) {
        println!("{}", style(text).dim());
    }

    fn show_busy(&mut self) {
        let spin = spinner();
        spin.start("MRE is analyzing preferences and metadata...");
        self.spinner = Some(spin);
    }

    fn hide_busy(&mut self) {
        if let Some(spin) = self.spinner.take() {
            spin.stop("");
        }
    }

    fn get_input(&mut self) -> Result<Input> {
        let message_text: String = input("Enter your movie preferences:         [Help: /?]")
            .placeholder("")
            .interact()?;
        let message_text = message_text.trim().to_string();

        let input_type = match parse_command(&message_text) {
            Some(Command::Exit) => InputType::Exit,
            Some(Command::Clear) => InputType::Clear,
            Some(Command::ToggleSteps) => {
                self.show_steps = !self.show_steps;
                println!(
                    "Intermediate steps {}",
                    if self.show_steps { "shown" } else { "hidden" }
                );
                InputType::AskAgain
            }
            Some(Command::ToggleTheme) => {
                self.theme = match self.theme {
                    Theme::Light => {
                        println!("Switching to Dark theme");
                        Theme::Dark
                    }
                    Theme::Dark => {
                        println!("Switching to Light theme");
                        Theme::Light
                    }
                };
                InputType::AskAgain
            }
            Some(Command::Help) => {
                println!("Commands:");
                println!("/exit - Exit the session");
                println!("/clear - Clear recommendations and start a new conversation");
                println!("/steps - Show or hide the intermediate reasoning steps");
                println!("/t - Toggle Light/Dark theme");
                println!("/? - Display this help message");
                InputType::AskAgain
            }
            None if message_text.is_empty() => InputType::AskAgain,
            None => {
                return Ok(Input {
                    input_type: InputType::Message,
                    content: Some(message_text),
                })
            }
        };

        Ok(Input {
            input_type,
            content: None,
        })
    }

    fn close(&self) {
        // No cleanup required
    }
}
