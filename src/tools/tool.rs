use super::ToolResult;

/// A local capability the model can ask the driver to run
///
/// Tools take the raw `input` string of a TOOL step and return a serialized record,
/// which the driver feeds back to the model as an observation.
pub trait Tool: Send + Sync {
    /// Get the name the model uses to call this tool
    fn name(&self) -> &str;

    /// Get a description of what the tool does and what input it expects
    fn description(&self) -> &str;

    /// Run the tool
    fn call(&self, input: &str) -> ToolResult<String>;
}
