//! Oracle Decisions
//!
//! Parses the decision oracle's reply into the next action. Replies that are
//! not one of the three structured shapes are kept verbatim as
//! [`Action::Unparsed`], which the loop treats as a thought.

use std::collections::HashMap;

use serde::Deserialize;

use crate::tool::ToolCall;

/// The next thing the agent does
#[derive(Clone, Debug)]
pub enum Action {
    /// Invoke a tool
    UseTool(ToolCall),
    /// Record a reasoning step
    Think(String),
    /// Finish with a result
    Complete(String),
    /// Reply was not valid structured data; carries the raw text
    Unparsed(String),
}

impl Action {
    /// Parse an oracle reply. Never fails.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Decision>(strip_code_fence(raw)) {
            Ok(Decision::UseTool { tool, input }) => Action::UseTool(ToolCall::new(tool, input)),
            Ok(Decision::Think { thought }) => Action::Think(thought),
            Ok(Decision::Complete { result }) => Action::Complete(match result {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            }),
            Err(e) => {
                tracing::debug!(error = %e, "Oracle reply is not a structured decision");
                Action::Unparsed(raw.to_string())
            }
        }
    }

    /// Short label for logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Action::UseTool(_) => "use_tool",
            Action::Think(_) => "think",
            Action::Complete(_) => "complete",
            Action::Unparsed(_) => "unparsed",
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Decision {
    UseTool {
        tool: String,
        #[serde(default)]
        input: HashMap<String, serde_json::Value>,
    },
    Think {
        thought: String,
    },
    Complete {
        result: serde_json::Value,
    },
}

/// Remove a surrounding ```json ... ``` fence, if any
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // drop the language tag line
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}
