//! Web search and weather tools
//!
//! Both are integration points: they answer with a placeholder until wired
//! to a real search or weather API.

use async_trait::async_trait;

use crate::error::Result;
use crate::tool::{ParameterSchema, Tool, ToolCall, ToolResult, ToolSchema};

/// Simulated web search
pub struct WebSearchTool;

#[async_trait]
impl Tool for WebSearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "web_search".into(),
            description: "Search the web for information".into(),
            parameters: vec![ParameterSchema::required("query", "Search query string")],
        }
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let query = call.str_arg("query")?;
        Ok(ToolResult::success(
            "web_search",
            format!("Search results for '{query}': [Simulated results - no search API configured]"),
        ))
    }
}

/// Simulated weather lookup
pub struct WeatherTool;

#[async_trait]
impl Tool for WeatherTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "weather".into(),
            description: "Get current weather for a location".into(),
            parameters: vec![ParameterSchema::required("location", "City name or location")],
        }
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let location = call.str_arg("location")?;
        Ok(ToolResult::success(
            "weather",
            format!("Weather in {location}: [Simulated - no weather API configured]"),
        ))
    }
}
