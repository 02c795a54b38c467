use std::io;
use thiserror::Error;

/// Custom error types for the shop-agents application
#[derive(Error, Debug)]
pub enum AppError {
    /// Error when a required parameter is missing from a tool call
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// Error when a tool call function is not implemented
    #[error("Tool call function not implemented: {0}")]
    UnsupportedToolCall(String),

    /// The model kept requesting tools past the configured limit
    #[error("Agent {agent} exceeded {limit} tool rounds")]
    ToolRoundsExceeded { agent: String, limit: usize },

    /// A pipeline stage finished without producing any text
    #[error("Agent {0} produced no output")]
    EmptyStageOutput(String),

    /// Wrapper for model client errors
    #[error("Model request error: {0}")]
    Model(#[from] genai::Error),

    /// Wrapper for I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Wrapper for JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
