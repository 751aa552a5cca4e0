//! Tool System
//!
//! Extensible tool framework for agent capabilities.
//! Tools are registered at runtime and invoked by the execution loop.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::executor::ToolExecutor;

/// Tool call request from the decision oracle
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool identifier
    pub name: String,

    /// Arguments as key-value pairs
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,

    /// Optional call ID for tracking
    #[serde(default)]
    pub id: Option<String>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: HashMap<String, serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
            id: Some(uuid::Uuid::new_v4().to_string()),
        }
    }

    /// Fetch a required string argument
    pub fn str_arg(&self, key: &str) -> Result<&str> {
        self.arguments
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| AgentError::ToolValidation(format!("Missing string parameter: {key}")))
    }
}

/// Result from tool execution
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool that was called
    pub name: String,

    /// Call ID (if provided in request)
    pub id: Option<String>,

    /// Whether the tool reported success
    pub success: bool,

    /// Output (success message or error)
    pub output: String,

    /// Structured data (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ToolResult {
    pub fn success(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            success: true,
            output: output.into(),
            data: None,
        }
    }

    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            success: false,
            output: error.into(),
            data: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON Schema type (string, number, boolean, object, array)
    #[serde(rename = "type")]
    pub param_type: String,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,
}

impl ParameterSchema {
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: "string".into(),
            description: description.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, description)
        }
    }
}

/// Tool definition schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description (shown to the oracle)
    pub description: String,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,
}

/// Compact tool description as shown in the decision context
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescription {
    pub description: String,
    pub parameters: BTreeMap<String, String>,
}

impl From<&ToolSchema> for ToolDescription {
    fn from(schema: &ToolSchema) -> Self {
        Self {
            description: schema.description.clone(),
            parameters: schema
                .parameters
                .iter()
                .map(|p| (p.name.clone(), p.description.clone()))
                .collect(),
        }
    }
}

/// Tool name -> description, ordered by name
pub type ToolDescriptions = BTreeMap<String, ToolDescription>;

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's schema
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult>;

    /// Validate arguments before execution.
    ///
    /// Rejects unknown parameter names and missing required ones.
    fn validate(&self, call: &ToolCall) -> Result<()> {
        let schema = self.schema();

        if let Some(unexpected) = call
            .arguments
            .keys()
            .find(|key| !schema.parameters.iter().any(|p| &p.name == *key))
        {
            return Err(AgentError::ToolValidation(format!(
                "{} got an unexpected parameter: {}",
                schema.name, unexpected
            )));
        }

        for param in &schema.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(AgentError::ToolValidation(format!(
                    "{} is missing required parameter: {}",
                    schema.name, param.name
                )));
            }
        }

        Ok(())
    }
}

/// Registry for available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry preloaded with every built-in tool
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtin::register_builtins(&mut registry);
        registry
    }

    /// Register a new tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let schema = tool.schema();
        self.tools.insert(schema.name, Arc::new(tool));
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Execute a tool call once.
    ///
    /// Never fails: unknown tools and tool errors come back as a failed
    /// [`ToolResult`] describing the problem.
    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        let Some(tool) = self.get(&call.name) else {
            return Self::not_found(call);
        };

        let outcome = match tool.validate(call) {
            Ok(()) => tool.execute(call).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => result.with_id(call.id.clone()),
            Err(e) => Self::execution_failed(call, &e),
        }
    }

    /// Execute a tool call through `executor`, with retries and ledger
    /// bookkeeping. Never fails, like [`ToolRegistry::execute`].
    pub async fn dispatch(&self, executor: &mut ToolExecutor, call: &ToolCall) -> ToolResult {
        let Some(tool) = self.get(&call.name) else {
            tracing::warn!(tool = %call.name, "Tool not found");
            return Self::not_found(call);
        };

        match executor.execute_with_retry(tool.as_ref(), &call.arguments).await {
            Ok(result) => result.with_id(call.id.clone()),
            Err(e) => Self::execution_failed(call, &e),
        }
    }

    fn not_found(call: &ToolCall) -> ToolResult {
        let err = AgentError::ToolNotFound(call.name.clone());
        ToolResult::failure(&call.name, format!("Error: Tool '{}' not found", call.name))
            .with_id(call.id.clone())
            .with_data(serde_json::json!({ "error": err.to_string() }))
    }

    fn execution_failed(call: &ToolCall, err: &AgentError) -> ToolResult {
        ToolResult::failure(&call.name, format!("Error executing {}: {}", call.name, err))
            .with_id(call.id.clone())
    }

    /// Get tool names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Descriptions of every tool, keyed by name
    pub fn descriptions(&self) -> ToolDescriptions {
        self.tools
            .iter()
            .map(|(name, tool)| (name.clone(), ToolDescription::from(&tool.schema())))
            .collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
