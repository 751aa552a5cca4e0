//! Built-in tools

mod calculator;
mod datetime;
mod file;
mod web;

pub use calculator::{CalculatorTool, evaluate};
pub use datetime::CurrentTimeTool;
pub use file::{FileReadTool, FileWriteTool};
pub use web::{WeatherTool, WebSearchTool};

use crate::tool::ToolRegistry;

/// Register every built-in tool
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(CalculatorTool);
    registry.register(WebSearchTool);
    registry.register(FileReadTool);
    registry.register(FileWriteTool);
    registry.register(CurrentTimeTool);
    registry.register(WeatherTool);
}
