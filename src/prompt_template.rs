use serde::Serialize;
use tera::{Context, Error as TeraError, Tera};

use crate::tools::ToolRegistry;

const SYSTEM_TEMPLATE: &str = include_str!("prompts/system.md");

#[derive(Debug, Serialize)]
struct ToolInfo {
    name: String,
    description: String,
}

#[derive(Debug, Serialize)]
struct SystemContext {
    tools: Vec<ToolInfo>,
    max_steps: usize,
}

pub fn load_prompt<T: Serialize>(template: &str, context_data: &T) -> Result<String, TeraError> {
    let mut tera = Tera::default();
    tera.add_raw_template("inline_template", template)?;
    let context = Context::from_serialize(context_data)?;
    let rendered = tera.render("inline_template", &context)?;
    Ok(rendered)
}

/// Render the Movie Recommendation Engine system prompt for the registered tools
pub fn system_prompt(tools: &ToolRegistry, max_steps: usize) -> Result<String, TeraError> {
    let context = SystemContext {
        tools: tools
            .describe()
            .into_iter()
            .map(|(name, description)| ToolInfo { name, description })
            .collect(),
        max_steps,
    };
    load_prompt(SYSTEM_TEMPLATE, &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_load_prompt() {
        let template = "Hello, {{ name }}! You are {{ age }} years old.";
        let mut context = HashMap::new();
        context.insert("name".to_string(), "Alice".to_string());
        context.insert("age".to_string(), 30.to_string());

        let result = load_prompt(template, &context).unwrap();
        assert_eq!(result, "Hello, Alice! You are 30 years old.");
    }

    #[test]
    fn test_load_prompt_missing_variable() {
        let template = "Hello, {{ name }}!";
        let context: HashMap<String, String> = HashMap::new();
        assert!(load_prompt(template, &context).is_err());
    }

    #[test]
    fn test_system_prompt_lists_tools() {
        let prompt = system_prompt(&ToolRegistry::with_defaults().unwrap(), 7).unwrap();
        assert!(prompt.contains("Movie Recommendation Engine"));
        assert!(prompt.contains("* `fetch_movie_metadata`:"));
        assert!(prompt.contains("* `get_movie_data`:"));
        assert!(prompt.contains("at most 7 steps"));
        for tag in ["START", "PLAN", "TOOL", "OBSERVE", "OUTPUT"] {
            assert!(prompt.contains(&format!("`{}`", tag)));
        }
    }
}
