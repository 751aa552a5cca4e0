//! Error Types

use std::path::PathBuf;

use thiserror::Error;

use crate::planner::StepStatus;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The decision oracle could not be reached or failed at the transport level.
    /// This is the only failure that aborts a goal.
    #[error("Decision oracle error: {0}")]
    DecisionOracle(String),

    /// Tool not found in registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool parameters did not match the tool's schema
    #[error("Tool validation error: {0}")]
    ToolValidation(String),

    /// Tool invocation failed after all retry attempts
    #[error("Tool '{tool}' failed after {attempts} attempt(s): {message}")]
    ToolExecution {
        tool: String,
        attempts: u32,
        message: String,
    },

    /// Saving or loading memory failed
    #[error("Persistence error for {}: {reason}", path.display())]
    Persistence { path: PathBuf, reason: String },

    /// Plan step index out of range
    #[error("Plan step {index} out of range (plan has {len} steps)")]
    InvalidPlanStep { index: usize, len: usize },

    /// Plan step status may only move forward
    #[error("Invalid step transition: {from} -> {to}")]
    InvalidStepTransition { from: StepStatus, to: StepStatus },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Check if a failed tool invocation is worth retrying.
    ///
    /// Usage errors (bad parameters, unknown tools, misuse of a plan) fail the
    /// same way every time.
    pub const fn is_retryable(&self) -> bool {
        !matches!(
            self,
            AgentError::ToolValidation(_)
                | AgentError::ToolNotFound(_)
                | AgentError::InvalidPlanStep { .. }
                | AgentError::InvalidStepTransition { .. }
                | AgentError::Config(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Provider(msg) => format!("The AI service encountered an error: {msg}"),
            AgentError::ProviderUnavailable(_) | AgentError::DecisionOracle(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            AgentError::ToolNotFound(name) => format!("The tool '{name}' is not available."),
            AgentError::ToolValidation(msg) => format!("Invalid tool input: {msg}"),
            AgentError::ToolExecution { tool, message, .. } => format!("Tool '{tool}' failed: {message}"),
            AgentError::Persistence { path, .. } => {
                format!("Could not access memory file {}.", path.display())
            }
            AgentError::Config(msg) => format!("Configuration problem: {msg}"),
            _ => "An unexpected error occurred.".into(),
        }
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AgentError::Persistence {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<anyhow::Error> for AgentError {
    fn from(err: anyhow::Error) -> Self {
        AgentError::Other(err.to_string())
    }
}
