//! Task Planner
//!
//! Decomposes a goal into suggested steps with fixed keyword rules. The plan
//! is advisory: it is shown to the decision oracle but does not bind it.

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::tool::ToolDescriptions;

/// What a plan step does
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    UseTool,
    Think,
    Synthesize,
}

/// Progress of a step or plan
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl StepStatus {
    const fn rank(self) -> u8 {
        match self {
            StepStatus::Pending => 0,
            StepStatus::InProgress => 1,
            StepStatus::Completed | StepStatus::Failed => 2,
        }
    }

    /// Statuses only move forward; re-applying the current status is allowed
    pub const fn can_transition_to(self, next: StepStatus) -> bool {
        self.rank() < next.rank() || self as u8 == next as u8
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Pending => write!(f, "pending"),
            StepStatus::InProgress => write!(f, "in_progress"),
            StepStatus::Completed => write!(f, "completed"),
            StepStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A single suggested step
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub action: StepAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    pub description: String,
    #[serde(default)]
    pub status: StepStatus,
}

impl Step {
    fn use_tool(tool: &str, description: &str) -> Self {
        Self {
            action: StepAction::UseTool,
            tool: Some(tool.into()),
            description: description.into(),
            status: StepStatus::Pending,
        }
    }

    fn new(action: StepAction, description: &str) -> Self {
        Self {
            action,
            tool: None,
            description: description.into(),
            status: StepStatus::Pending,
        }
    }
}

/// An ordered list of steps for one goal.
///
/// The step list is fixed at creation; only step statuses change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub goal: String,
    steps: Vec<Step>,
    status: StepStatus,
}

impl Plan {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Overall status, derived from the step statuses
    pub const fn status(&self) -> StepStatus {
        self.status
    }

    /// Move the step at `index` to `status`.
    ///
    /// Out-of-range indices and backwards transitions are rejected.
    pub fn update_status(&mut self, index: usize, status: StepStatus) -> Result<()> {
        let len = self.steps.len();
        let step = self
            .steps
            .get_mut(index)
            .ok_or(AgentError::InvalidPlanStep { index, len })?;

        if !step.status.can_transition_to(status) {
            return Err(AgentError::InvalidStepTransition {
                from: step.status,
                to: status,
            });
        }

        step.status = status;
        self.status = self.derive_status();
        Ok(())
    }

    /// First step still pending
    pub fn next_step(&self) -> Option<&Step> {
        self.steps.iter().find(|s| s.status == StepStatus::Pending)
    }

    /// Index of the first pending step matching `predicate`
    pub fn find_pending(&self, predicate: impl Fn(&Step) -> bool) -> Option<usize> {
        self.steps
            .iter()
            .position(|s| s.status == StepStatus::Pending && predicate(s))
    }

    /// Every step completed. A failed step means the plan is not complete.
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|s| s.status == StepStatus::Completed)
    }

    /// Numbered listing of the steps with their status
    pub fn summary(&self) -> String {
        let mut summary = format!("Goal: {}\n\nSteps:\n", self.goal);
        for (i, step) in self.steps.iter().enumerate() {
            summary.push_str(&format!(
                "{}. [{}] {}\n",
                i + 1,
                step.status.to_string().to_uppercase(),
                step.description
            ));
        }
        summary
    }

    fn derive_status(&self) -> StepStatus {
        if self.steps.iter().any(|s| s.status == StepStatus::Failed) {
            StepStatus::Failed
        } else if self.is_complete() {
            StepStatus::Completed
        } else if self.steps.iter().any(|s| s.status != StepStatus::Pending) {
            StepStatus::InProgress
        } else {
            StepStatus::Pending
        }
    }
}

const CALCULATION_MARKERS: &[&str] = &["calculate", "compute", "+", "-", "*", "/", "sum"];
const SEARCH_WORDS: &[&str] = &["search", "find", "look up", "research"];
const TIME_WORDS: &[&str] = &["time", "date", "when", "current"];

/// Keyword-based goal decomposition
#[derive(Clone, Copy, Debug, Default)]
pub struct TaskPlanner;

impl TaskPlanner {
    pub const fn new() -> Self {
        Self
    }

    /// Build a plan for `goal`.
    ///
    /// Deterministic: every matched category adds a tool step, no match adds
    /// a single think step, and a synthesize step always closes the plan.
    pub fn create_plan(&self, goal: &str, available_tools: &ToolDescriptions) -> Plan {
        let goal_lower = goal.to_lowercase();
        let contains_any = |words: &[&str]| words.iter().any(|w| goal_lower.contains(w));

        let mut steps = Vec::new();

        if contains_any(CALCULATION_MARKERS) {
            steps.push(Step::use_tool("calculator", "Perform calculation"));
        }
        if contains_any(SEARCH_WORDS) {
            steps.push(Step::use_tool("web_search", "Search for information"));
        }
        if goal_lower.contains("read") && goal_lower.contains("file") {
            steps.push(Step::use_tool("file_read", "Read file contents"));
        }
        if goal_lower.contains("write") || goal_lower.contains("save") {
            steps.push(Step::use_tool("file_write", "Write to file"));
        }
        if contains_any(TIME_WORDS) {
            steps.push(Step::use_tool("get_current_time", "Get current time"));
        }
        if goal_lower.contains("weather") {
            steps.push(Step::use_tool("weather", "Get weather information"));
        }

        if steps.is_empty() {
            steps.push(Step::new(
                StepAction::Think,
                "Analyze the goal and determine approach",
            ));
        }

        steps.push(Step::new(
            StepAction::Synthesize,
            "Combine results and provide final answer",
        ));

        for tool in steps.iter().filter_map(|s| s.tool.as_deref()) {
            if !available_tools.is_empty() && !available_tools.contains_key(tool) {
                tracing::warn!(tool, "Plan suggests a tool that is not registered");
            }
        }

        tracing::debug!(steps = steps.len(), "Plan created");

        Plan {
            goal: goal.to_string(),
            steps,
            status: StepStatus::Pending,
        }
    }
}
