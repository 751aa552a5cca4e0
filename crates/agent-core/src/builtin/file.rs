//! File read/write tools

use std::io::ErrorKind;

use async_trait::async_trait;

use crate::error::Result;
use crate::tool::{ParameterSchema, Tool, ToolCall, ToolResult, ToolSchema};

/// Reads a text file
pub struct FileReadTool;

#[async_trait]
impl Tool for FileReadTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "file_read".into(),
            description: "Read contents of a file".into(),
            parameters: vec![ParameterSchema::required("filepath", "Path to the file to read")],
        }
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let path = call.str_arg("filepath")?;

        Ok(match tokio::fs::read_to_string(path).await {
            Ok(content) => ToolResult::success("file_read", format!("File content:\n{content}")),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                ToolResult::failure("file_read", format!("Error: File '{path}' not found"))
            }
            Err(e) => ToolResult::failure("file_read", format!("Error reading file: {e}")),
        })
    }
}

/// Writes (overwrites) a text file
pub struct FileWriteTool;

#[async_trait]
impl Tool for FileWriteTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "file_write".into(),
            description: "Write content to a file".into(),
            parameters: vec![
                ParameterSchema::required("filepath", "Path to the file to write"),
                ParameterSchema::required("content", "Content to write to the file"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let path = call.str_arg("filepath")?;
        let content = call.str_arg("content")?;

        Ok(match tokio::fs::write(path, content).await {
            Ok(()) => {
                tracing::debug!(path, bytes = content.len(), "File written");
                ToolResult::success("file_write", format!("Successfully wrote to {path}"))
            }
            Err(e) => ToolResult::failure("file_write", format!("Error writing file: {e}")),
        })
    }
}
