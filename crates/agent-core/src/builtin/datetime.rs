//! Current time tool

use async_trait::async_trait;

use crate::error::Result;
use crate::tool::{ParameterSchema, Tool, ToolCall, ToolResult, ToolSchema};

const NAME: &str = "get_current_time";

/// Returns the current local date and time
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.into(),
            description: "Get the current date and time".into(),
            parameters: vec![ParameterSchema::optional(
                "format",
                "Output format: 'human' (default), 'iso', or 'unix'",
            )],
        }
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let format = call
            .arguments
            .get("format")
            .and_then(|v| v.as_str())
            .unwrap_or("human");

        let now = chrono::Local::now();

        let output = match format {
            "iso" => now.to_rfc3339(),
            "unix" => now.timestamp().to_string(),
            _ => now.format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        Ok(ToolResult::success(NAME, format!("Current time: {output}")))
    }
}
