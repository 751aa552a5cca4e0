//! # agent-runtime
//!
//! Decision oracle providers for agent-core.
//!
//! ## Providers
//!
//! - **Ollama** (default): Local LLM inference via Ollama
//! - **OpenAI** (`openai` feature): any OpenAI-compatible chat completions API
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::ollama::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost", 11434);
//! let mut agent = AgentBuilder::new()
//!     .provider(Arc::new(provider))
//!     .tools(ToolRegistry::with_builtins())
//!     .build()?;
//! let outcome = agent.execute("Calculate 15 * 23").await?;
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

#[cfg(feature = "openai")]
pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use agent_core::{
    Agent, AgentBuilder, AgentConfig, AgentError, ExecutionOutcome, LlmProvider, Message, Result,
    Role, Tool, ToolRegistry,
};
