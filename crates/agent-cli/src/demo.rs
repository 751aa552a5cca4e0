//! Scripted demonstration goals

use clap::ValueEnum;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// Basic calculation
    Calc,
    /// Current time plus arithmetic
    Multi,
    /// Write a file
    File,
    /// Multi-step word problem
    Reason,
}

impl Demo {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Calc => "Basic Calculation",
            Self::Multi => "Multi-Step Task",
            Self::File => "File Operations",
            Self::Reason => "Complex Reasoning",
        }
    }

    pub const fn goal(self) -> &'static str {
        match self {
            Self::Calc => "Calculate the result of (15 * 23) + 100 - 50",
            Self::Multi => "Get the current time and calculate how many hours until midnight",
            Self::File => "Write 'Hello from Agentic AI!' to a file called test_output.txt",
            Self::Reason => {
                "If a train travels at 60 mph for 2.5 hours, then increases speed to 80 mph \
                 for another 1.5 hours, what is the total distance traveled?"
            }
        }
    }

    /// Iteration budget for this demo
    pub const fn max_iterations(self) -> usize {
        match self {
            Self::Calc => 5,
            Self::Multi | Self::File => 10,
            Self::Reason => 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{TaskPlanner, ToolRegistry};

    #[test]
    fn test_demo_goals_plan_expected_tools() {
        let tools = ToolRegistry::with_builtins().descriptions();
        let planned = |demo: Demo| -> Vec<String> {
            TaskPlanner::new()
                .create_plan(demo.goal(), &tools)
                .steps()
                .iter()
                .filter_map(|s| s.tool.clone())
                .collect()
        };

        assert_eq!(planned(Demo::Calc), vec!["calculator"]);
        assert_eq!(planned(Demo::File), vec!["file_write"]);
        assert!(planned(Demo::Multi).contains(&"get_current_time".to_string()));
    }
}
