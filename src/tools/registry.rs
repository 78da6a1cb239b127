use std::collections::BTreeMap;
use std::sync::Arc;

use super::movies::MovieMetadataTool;
use super::{Tool, ToolError, ToolResult};

/// Capability-keyed lookup table from tool name to implementation
///
/// Aliases share the same implementation as their target. Names are kept ordered so
/// the rendered system prompt is stable between runs.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the movie metadata tool and its `get_movie_data` alias
    pub fn with_defaults() -> ToolResult<Self> {
        let mut registry = Self::new();
        registry.register(Arc::new(MovieMetadataTool))?;
        registry.register_alias("get_movie_data", MovieMetadataTool::NAME)?;
        Ok(registry)
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) -> ToolResult<()> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::Duplicate(name));
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn register_alias(&mut self, alias: &str, target: &str) -> ToolResult<()> {
        if self.tools.contains_key(alias) {
            return Err(ToolError::Duplicate(alias.to_string()));
        }
        let tool = self
            .get(target)
            .ok_or_else(|| ToolError::NotFound(target.to_string()))?;
        self.tools.insert(alias.to_string(), tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn call(&self, name: &str, input: &str) -> ToolResult<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.call(input)
    }

    /// Registered names paired with their descriptions, aliases included
    pub fn describe(&self) -> Vec<(String, String)> {
        self.tools
            .iter()
            .map(|(name, tool)| (name.clone(), tool.description().to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
