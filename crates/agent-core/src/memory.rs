//! Agent Memory
//!
//! Bounded conversation history plus an unbounded log of tool invocations.
//! The history is what the decision oracle sees; the tool log backs session
//! statistics and therefore is never truncated.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::message::{Message, Role};

/// Default number of messages kept in history
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// One recorded tool invocation outcome
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolUseRecord {
    /// Name of the tool that was used
    #[serde(rename = "tool")]
    pub tool_name: String,

    /// Parameters the tool was called with
    pub input: HashMap<String, serde_json::Value>,

    /// What the tool returned
    pub result: serde_json::Value,

    #[serde(deserialize_with = "crate::message::deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Aggregate view of the memory contents
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySummary {
    pub total_messages: usize,
    pub total_tool_uses: usize,
    pub unique_tools_used: usize,
    pub tool_usage_stats: BTreeMap<String, usize>,
}

/// On-disk layout of a saved memory
#[derive(Serialize, Deserialize)]
struct MemorySnapshot {
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    tool_usage: Vec<ToolUseRecord>,
}

/// Conversation memory for a single agent
#[derive(Clone, Debug)]
pub struct MemoryStore {
    messages: Vec<Message>,
    tool_usage: Vec<ToolUseRecord>,
    max_history: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl MemoryStore {
    pub fn new(max_history: usize) -> Self {
        Self {
            messages: Vec::new(),
            tool_usage: Vec::new(),
            max_history,
        }
    }

    /// Append a message, evicting the oldest ones beyond `max_history`
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
        self.enforce_history_limit();
    }

    /// Record a tool invocation outcome
    pub fn add_tool_use(
        &mut self,
        tool_name: impl Into<String>,
        input: HashMap<String, serde_json::Value>,
        result: serde_json::Value,
    ) {
        self.tool_usage.push(ToolUseRecord {
            tool_name: tool_name.into(),
            input,
            result,
            timestamp: Utc::now(),
        });
    }

    /// Last `n` messages rendered as `role: content` lines, oldest first
    pub fn recent_history(&self, n: usize) -> String {
        let start = self.messages.len().saturating_sub(n);
        self.messages[start..]
            .iter()
            .fold(String::new(), |mut out, msg| {
                out.push_str(&msg.to_string());
                out.push('\n');
                out
            })
    }

    /// Last `n` tool invocations, oldest first
    pub fn recent_tool_uses(&self, n: usize) -> &[ToolUseRecord] {
        let start = self.tool_usage.len().saturating_sub(n);
        &self.tool_usage[start..]
    }

    /// Distinct tool names ever recorded (sorted)
    pub fn tools_used(&self) -> Vec<String> {
        self.tool_usage
            .iter()
            .map(|r| r.tool_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Invocation count per tool
    pub fn tool_usage_stats(&self) -> BTreeMap<String, usize> {
        let mut stats = BTreeMap::new();
        for record in &self.tool_usage {
            *stats.entry(record.tool_name.clone()).or_insert(0) += 1;
        }
        stats
    }

    pub fn summary(&self) -> MemorySummary {
        let tool_usage_stats = self.tool_usage_stats();
        MemorySummary {
            total_messages: self.messages.len(),
            total_tool_uses: self.tool_usage.len(),
            unique_tools_used: tool_usage_stats.len(),
            tool_usage_stats,
        }
    }

    /// Drop all messages and tool records
    pub fn clear(&mut self) {
        self.messages.clear();
        self.tool_usage.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn tool_usage(&self) -> &[ToolUseRecord] {
        &self.tool_usage
    }

    pub const fn max_history(&self) -> usize {
        self.max_history
    }

    /// Write messages and tool usage to `path` as JSON
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let snapshot = MemorySnapshot {
            messages: self.messages.clone(),
            tool_usage: self.tool_usage.clone(),
        };

        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| AgentError::persistence(path, e))?;
        std::fs::write(path, json).map_err(|e| AgentError::persistence(path, e))?;

        tracing::debug!(
            path = %path.display(),
            messages = self.messages.len(),
            tool_uses = self.tool_usage.len(),
            "Memory saved"
        );
        Ok(())
    }

    /// Replace the current state with the contents of `path`.
    ///
    /// On error the store is left untouched.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| AgentError::persistence(path, e))?;
        let snapshot: MemorySnapshot =
            serde_json::from_str(&raw).map_err(|e| AgentError::persistence(path, e))?;

        self.messages = snapshot.messages;
        self.tool_usage = snapshot.tool_usage;
        self.enforce_history_limit();

        tracing::debug!(
            path = %path.display(),
            messages = self.messages.len(),
            tool_uses = self.tool_usage.len(),
            "Memory loaded"
        );
        Ok(())
    }

    fn enforce_history_limit(&mut self) {
        if self.messages.len() > self.max_history {
            let excess = self.messages.len() - self.max_history;
            self.messages.drain(..excess);
        }
    }
}
