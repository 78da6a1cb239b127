mod error;
pub mod movies;
mod registry;
mod tool;

pub use error::{ToolError, ToolResult};
pub use registry::ToolRegistry;
pub use tool::Tool;
