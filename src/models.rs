//! These models represent the objects passed between the driver, the model and the tools
//!
//! The conversation is a flat list of role-tagged messages. Assistant messages carry the
//! raw structured step returned by the model, developer messages carry tool observations,
//! and the final answer is always the content of an OUTPUT step.
pub mod message;
pub mod role;
pub mod step;
