//! # agent-core
//!
//! Autonomous goal execution: an agent that plans, decides, uses tools and
//! remembers, with a provider-agnostic LLM acting as its decision oracle.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           Agent                              │
//! │  ┌─────────────┐  ┌─────────────┐  ┌──────────────────────┐  │
//! │  │  Execution  │──│   Planner   │  │     LlmProvider      │  │
//! │  │    Loop     │──│   Memory    │──│  (decision oracle)   │  │
//! │  └─────────────┘  └─────────────┘  └──────────────────────┘  │
//! │         │                                                    │
//! │  ┌─────────────┐  ┌─────────────┐                            │
//! │  │    Tool     │──│    Tool     │                            │
//! │  │  Registry   │  │  Executor   │ (retry + ledger)           │
//! │  └─────────────┘  └─────────────┘                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait enables swapping between Ollama, OpenAI-compatible
//! APIs or a scripted test double without changing agent logic.

pub mod builtin;
pub mod decision;
pub mod error;
pub mod executor;
pub mod memory;
pub mod message;
pub mod planner;
pub mod provider;
pub mod reasoning;
pub mod tool;

pub use decision::Action;
pub use error::{AgentError, Result};
pub use executor::{ExecutionRecord, ExecutionStats, RetryPolicy, ToolExecutor};
pub use memory::{MemoryStore, MemorySummary, ToolUseRecord};
pub use message::{Message, Role};
pub use planner::{Plan, Step, StepAction, StepStatus, TaskPlanner};
pub use provider::{GenerationOptions, LlmProvider};
pub use reasoning::{Agent, AgentBuilder, AgentConfig, ExecutionOutcome, EXHAUSTED_MESSAGE};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema};
