//! Execution Loop
//!
//! Drives one goal to completion: plan once, then repeatedly ask the
//! decision oracle for the next action and carry it out, until the oracle
//! declares the goal complete or the iteration budget runs out.
//!
//! Tool failures never abort a goal; they come back as text and the loop
//! moves on. The only fatal condition is the oracle itself being unreachable.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::decision::Action;
use crate::error::{AgentError, Result};
use crate::executor::{ExecutionStats, RetryPolicy, ToolExecutor};
use crate::memory::{DEFAULT_MAX_HISTORY, MemoryStore};
use crate::message::{Message, Role};
use crate::planner::{Plan, Step, StepAction, StepStatus, TaskPlanner};
use crate::provider::{GenerationOptions, LlmProvider};
use crate::tool::{ToolCall, ToolRegistry};

/// Final result when the iteration budget runs out
pub const EXHAUSTED_MESSAGE: &str = "Maximum iterations reached without completing goal";

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// System prompt sent with every decision request
    pub system_prompt: String,

    /// Maximum loop iterations per goal
    pub max_iterations: usize,

    /// Number of recent messages included in each decision context
    pub history_window: usize,

    /// Messages kept in memory
    pub max_history: usize,

    /// Generation options (model, temperature) for the decision oracle
    pub generation: GenerationOptions,

    /// Retry behaviour for tool calls
    pub retry: RetryPolicy,

    /// Time limit for a single decision request. `None` waits indefinitely.
    pub decision_timeout: Option<Duration>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_iterations: 10,
            history_window: 5,
            max_history: DEFAULT_MAX_HISTORY,
            generation: GenerationOptions::default(),
            retry: RetryPolicy::default(),
            decision_timeout: None,
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = r"You are an autonomous AI agent that can use tools to accomplish goals.

Your capabilities:
- Break down complex tasks into steps
- Select and use appropriate tools
- Make decisions based on context
- Learn from results and adapt
- Pursue goals until completion

Guidelines:
- Always think step-by-step
- Use tools when needed for information or actions
- Be efficient - don't repeat unnecessary steps
- If stuck, try a different approach
- Complete the goal as accurately as possible

Respond only with valid JSON in the specified format.";

const RESPONSE_FORMAT: &str = r#"Based on the goal, plan, and history, decide your next action.
Respond with a JSON object in one of these formats:

1. To use a tool:
{"type": "use_tool", "tool": "tool_name", "input": {"param": "value"}}

2. To think/reason:
{"type": "think", "thought": "your reasoning here"}

3. To complete the goal:
{"type": "complete", "result": "final answer or result"}
"#;

/// What `execute` reports back
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// Finished with iterations to spare
    pub success: bool,

    /// The oracle signalled completion (even on the very last iteration)
    pub completed: bool,

    /// Final answer, or [`EXHAUSTED_MESSAGE`]
    pub result: String,

    /// Iterations used
    pub iterations: usize,

    /// Distinct tools recorded in memory
    pub tools_used: Vec<String>,
}

/// The main Agent struct
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
    memory: MemoryStore,
    planner: TaskPlanner,
    executor: ToolExecutor,
    plan: Option<Plan>,
}

impl Agent {
    /// Create a new agent
    pub fn new(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>, config: AgentConfig) -> Self {
        tracing::info!(
            provider = provider.name(),
            model = %config.generation.model,
            tools = tools.len(),
            "Agent initialized"
        );

        Self {
            memory: MemoryStore::new(config.max_history),
            executor: ToolExecutor::new(config.retry.clone()),
            planner: TaskPlanner::new(),
            plan: None,
            provider,
            tools,
            config,
        }
    }

    /// Pursue `goal` until the oracle completes it or iterations run out.
    ///
    /// Fails only with [`AgentError::DecisionOracle`]; everything recorded
    /// up to that point stays in memory.
    pub async fn execute(&mut self, goal: &str) -> Result<ExecutionOutcome> {
        tracing::info!(goal, "Goal received");

        self.memory.add_message(Role::User, goal);

        let mut plan = self.planner.create_plan(goal, &self.tools.descriptions());
        tracing::info!(steps = plan.steps().len(), "Plan created");

        let run = self.run_loop(goal, &mut plan).await;
        self.plan = Some(plan);
        let (final_result, iterations) = run?;

        let completed = final_result.is_some();
        let result = final_result.unwrap_or_else(|| {
            tracing::warn!(iterations, "Iteration budget exhausted");
            EXHAUSTED_MESSAGE.to_string()
        });

        self.memory.add_message(Role::Assistant, result.clone());

        Ok(ExecutionOutcome {
            success: iterations < self.config.max_iterations,
            completed,
            result,
            iterations,
            tools_used: self.memory.tools_used(),
        })
    }

    async fn run_loop(&mut self, goal: &str, plan: &mut Plan) -> Result<(Option<String>, usize)> {
        let max_iterations = self.config.max_iterations;
        let mut iteration = 0;

        while iteration < max_iterations {
            iteration += 1;
            tracing::info!(iteration, max_iterations, "Iteration started");

            let action = self.decide_next_action(goal, plan).await?;
            tracing::debug!(iteration, action = action.kind(), "Action decided");

            match action {
                Action::Complete(result) => {
                    tracing::info!(iteration, "Goal achieved");
                    advance(plan, |s| s.action == StepAction::Synthesize, StepStatus::Completed);
                    return Ok((Some(result), iteration));
                }
                Action::UseTool(call) => self.use_tool(plan, call).await,
                Action::Think(thought) | Action::Unparsed(thought) => {
                    tracing::info!(thought = %thought, "Thinking");
                    advance(plan, |s| s.action == StepAction::Think, StepStatus::Completed);
                    self.memory.add_message(Role::Assistant, thought);
                }
            }
        }

        Ok((None, iteration))
    }

    async fn use_tool(&mut self, plan: &mut Plan, call: ToolCall) {
        tracing::info!(tool = %call.name, input = ?call.arguments, "Using tool");

        let step = plan.find_pending(|s| {
            s.action == StepAction::UseTool && s.tool.as_deref() == Some(call.name.as_str())
        });
        if let Some(index) = step {
            mark(plan, index, StepStatus::InProgress);
        }

        let result = self.tools.dispatch(&mut self.executor, &call).await;

        if result.success {
            tracing::info!(tool = %call.name, output = %result.output, "Tool returned");
        } else {
            tracing::warn!(tool = %call.name, output = %result.output, "Tool failed");
        }

        if let Some(index) = step {
            let status = if result.success { StepStatus::Completed } else { StepStatus::Failed };
            mark(plan, index, status);
        }

        self.memory
            .add_tool_use(call.name, call.arguments, serde_json::Value::String(result.output));
    }

    /// Ask the oracle for the next action
    async fn decide_next_action(&self, goal: &str, plan: &Plan) -> Result<Action> {
        let context = self.build_context(goal, plan);
        tracing::debug!(tokens = self.provider.estimate_tokens(&context), "Decision context built");

        let messages = [Message::system(&self.config.system_prompt), Message::user(context)];
        let request = self.provider.complete(&messages, &self.config.generation);

        let completion = match self.config.decision_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| AgentError::DecisionOracle(format!("no reply within {limit:?}")))?,
            None => request.await,
        }
        .map_err(|e| match e {
            AgentError::DecisionOracle(_) => e,
            other => AgentError::DecisionOracle(other.to_string()),
        })?;

        Ok(Action::parse(&completion.content))
    }

    /// Build context string for decision making
    fn build_context(&self, goal: &str, plan: &Plan) -> String {
        let plan_json = serde_json::to_string_pretty(plan).unwrap_or_default();
        let tools_json = serde_json::to_string_pretty(&self.tools.descriptions()).unwrap_or_default();

        let tool_results = self
            .memory
            .recent_tool_uses(self.config.history_window)
            .iter()
            .map(|r| {
                let input = serde_json::to_string(&r.input).unwrap_or_default();
                let output = r.result.as_str().map_or_else(|| r.result.to_string(), str::to_string);
                format!("- {}({}) -> {}\n", r.tool_name, input, output)
            })
            .collect::<String>();

        format!(
            "\nGoal: {goal}\n\nPlan:\n{plan_json}\n\nAvailable Tools:\n{tools_json}\n\n\
             Conversation History:\n{history}\n\
             Recent Tool Results:\n{results}\n\
             {RESPONSE_FORMAT}",
            history = self.memory.recent_history(self.config.history_window),
            results = if tool_results.is_empty() { "(none)\n".to_string() } else { tool_results },
        )
    }

    /// Clear memory. The last plan is kept for inspection.
    pub fn reset(&mut self) {
        self.memory.clear();
        tracing::info!("Agent memory cleared");
    }

    /// Conversation memory
    pub const fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Mutable memory, e.g. to load a saved session
    pub const fn memory_mut(&mut self) -> &mut MemoryStore {
        &mut self.memory
    }

    /// Plan of the most recent goal
    pub const fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// Human-readable plan listing
    pub fn plan_summary(&self) -> String {
        self.plan.as_ref().map_or_else(|| "No active plan".to_string(), Plan::summary)
    }

    /// Tool executor ledger statistics
    pub fn execution_stats(&self) -> ExecutionStats {
        self.executor.execution_stats()
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get configuration
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Move the first pending step matching `predicate` to `status`
fn advance(plan: &mut Plan, predicate: impl Fn(&Step) -> bool, status: StepStatus) {
    if let Some(index) = plan.find_pending(predicate) {
        mark(plan, index, status);
    }
}

fn mark(plan: &mut Plan, index: usize, status: StepStatus) {
    if let Err(e) = plan.update_status(index, status) {
        tracing::debug!(index, error = %e, "Plan step not updated");
    }
}

/// Builder for Agent configuration
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: ToolRegistry::new(),
            config: AgentConfig::default(),
        }
    }

    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    #[must_use]
    pub fn tool<T: crate::tool::Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.register(tool);
        self
    }

    #[must_use]
    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    #[must_use]
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    #[must_use]
    pub const fn temperature(mut self, temp: f32) -> Self {
        self.config.generation.temperature = temp;
        self
    }

    #[must_use]
    pub const fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    #[must_use]
    pub const fn max_history(mut self, max: usize) -> Self {
        self.config.max_history = max;
        self
    }

    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    #[must_use]
    pub const fn decision_timeout(mut self, limit: Duration) -> Self {
        self.config.decision_timeout = Some(limit);
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;

        if !(0.0..=2.0).contains(&self.config.generation.temperature) {
            return Err(AgentError::Config(format!(
                "temperature must be between 0 and 2, got {}",
                self.config.generation.temperature
            )));
        }

        Ok(Agent::new(provider, Arc::new(self.tools), self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::CalculatorTool;
    use crate::provider::{Completion, ModelInfo};
    use crate::tool::{Tool, ToolResult, ToolSchema};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replies from a script, then repeats the last reply
    struct ScriptedProvider {
        replies: Mutex<VecDeque<String>>,
        last: Mutex<String>,
        contexts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(replies: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.iter().map(|r| (*r).to_string()).collect()),
                last: Mutex::new(String::new()),
                contexts: Mutex::new(Vec::new()),
            })
        }

        fn contexts(&self) -> Vec<String> {
            self.contexts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        async fn complete(&self, messages: &[Message], options: &GenerationOptions) -> Result<Completion> {
            assert_eq!(messages.len(), 2);
            assert_eq!(messages[0].role, Role::System);
            self.contexts.lock().unwrap().push(messages[1].content.clone());

            let mut last = self.last.lock().unwrap();
            if let Some(next) = self.replies.lock().unwrap().pop_front() {
                *last = next;
            }
            Ok(Completion {
                content: last.clone(),
                model: options.model.clone(),
                finish_reason: None,
            })
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>> {
            Ok(Vec::new())
        }
    }

    struct OfflineProvider;

    #[async_trait]
    impl LlmProvider for OfflineProvider {
        fn name(&self) -> &str {
            "offline"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(false)
        }

        async fn complete(&self, _messages: &[Message], _options: &GenerationOptions) -> Result<Completion> {
            Err(AgentError::ProviderUnavailable("connection refused".into()))
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>> {
            Ok(Vec::new())
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl LlmProvider for SlowProvider {
        fn name(&self) -> &str {
            "slow"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        async fn complete(&self, _messages: &[Message], options: &GenerationOptions) -> Result<Completion> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Completion {
                content: String::new(),
                model: options.model.clone(),
                finish_reason: None,
            })
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>> {
            Ok(Vec::new())
        }
    }

    struct BrokenTool;

    #[async_trait]
    impl Tool for BrokenTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "broken".into(),
                description: "Always fails".into(),
                parameters: vec![],
            }
        }

        async fn execute(&self, _call: &crate::tool::ToolCall) -> Result<ToolResult> {
            Err(AgentError::Other("disk on fire".into()))
        }
    }

    fn agent(provider: Arc<dyn LlmProvider>, max_iterations: usize) -> Agent {
        AgentBuilder::new()
            .provider(provider)
            .tool(CalculatorTool)
            .tool(BrokenTool)
            .retry_policy(RetryPolicy::immediate(3))
            .max_iterations(max_iterations)
            .build()
            .unwrap()
    }

    fn contents(agent: &Agent) -> Vec<(Role, String)> {
        agent
            .memory()
            .messages()
            .iter()
            .map(|m| (m.role, m.content.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_exhausts_iterations_when_only_thinking() {
        let provider = ScriptedProvider::new(&[r#"{"type":"think","thought":"x"}"#]);
        let mut agent = agent(provider, 1);

        let outcome = agent.execute("Ponder").await.unwrap();

        assert!(!outcome.success);
        assert!(!outcome.completed);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.result, EXHAUSTED_MESSAGE);
        assert_eq!(
            contents(&agent),
            vec![
                (Role::User, "Ponder".to_string()),
                (Role::Assistant, "x".to_string()),
                (Role::Assistant, EXHAUSTED_MESSAGE.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_complete_on_first_iteration() {
        let provider = ScriptedProvider::new(&[r#"{"type":"complete","result":"42"}"#]);
        let mut agent = agent(provider.clone(), 10);

        let outcome = agent.execute("What is six times seven?").await.unwrap();

        assert!(outcome.success);
        assert!(outcome.completed);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.result, "42");
        assert!(outcome.tools_used.is_empty());
        assert_eq!(provider.contexts().len(), 1);
        assert_eq!(agent.memory().messages().last().unwrap().content, "42");
    }

    #[tokio::test]
    async fn test_complete_on_last_iteration_is_not_success() {
        let provider = ScriptedProvider::new(&[r#"{"type":"complete","result":"done"}"#]);
        let mut agent = agent(provider, 1);

        let outcome = agent.execute("Finish").await.unwrap();

        assert!(!outcome.success);
        assert!(outcome.completed);
        assert_eq!(outcome.result, "done");
    }

    #[tokio::test]
    async fn test_tool_then_complete() {
        let provider = ScriptedProvider::new(&[
            r#"{"type":"use_tool","tool":"calculator","input":{"expression":"2+2"}}"#,
            r#"{"type":"complete","result":"2+2 is 4"}"#,
        ]);
        let mut agent = agent(provider.clone(), 5);

        let outcome = agent.execute("Calculate 2+2").await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.iterations, 2);
        assert_eq!(outcome.tools_used, vec!["calculator"]);

        let record = &agent.memory().tool_usage()[0];
        assert_eq!(record.result, serde_json::json!("Result: 4"));
        assert_eq!(agent.execution_stats().successful, 1);

        let plan = agent.plan().unwrap();
        assert!(plan.is_complete());

        // the second decision saw the first tool result
        let contexts = provider.contexts();
        assert!(contexts[0].contains("Recent Tool Results:\n(none)"));
        assert!(contexts[1].contains("Result: 4"));
    }

    #[tokio::test]
    async fn test_failing_tools_do_not_abort() {
        let provider = ScriptedProvider::new(&[
            r#"{"type":"use_tool","tool":"broken","input":{}}"#,
            r#"{"type":"use_tool","tool":"teleport","input":{"to":"mars"}}"#,
            r#"{"type":"use_tool","tool":"calculator","input":{"expr":"1"}}"#,
            r#"{"type":"complete","result":"gave up gracefully"}"#,
        ]);
        let mut agent = agent(provider, 10);

        let outcome = agent.execute("Try everything").await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.result, "gave up gracefully");

        let results: Vec<_> = agent
            .memory()
            .tool_usage()
            .iter()
            .map(|r| r.result.as_str().unwrap().to_string())
            .collect();
        assert!(results[0].starts_with("Error executing broken: Tool 'broken' failed after 3 attempt(s)"));
        assert_eq!(results[1], "Error: Tool 'teleport' not found");
        assert!(results[2].starts_with("Error executing calculator: Tool validation error"));

        // unknown tools never reach the executor
        let stats = agent.execution_stats();
        assert_eq!(stats.total_executions, 2);
        assert_eq!(stats.failed, 2);
    }

    #[tokio::test]
    async fn test_tool_reported_failure_agrees_with_plan_and_ledger() {
        let provider = ScriptedProvider::new(&[
            r#"{"type":"use_tool","tool":"calculator","input":{"expression":"1 / 0"}}"#,
            r#"{"type":"complete","result":"undefined"}"#,
        ]);
        let mut agent = agent(provider, 5);

        agent.execute("Calculate 1 / 0").await.unwrap();

        let plan = agent.plan().unwrap();
        assert_eq!(plan.steps()[0].status, StepStatus::Failed);
        assert_eq!(plan.status(), StepStatus::Failed);

        let stats = agent.execution_stats();
        assert_eq!((stats.successful, stats.failed), (0, 1));
        assert_eq!(
            agent.memory().tool_usage()[0].result,
            serde_json::json!("Calculation error: division by zero")
        );
    }

    #[tokio::test]
    async fn test_malformed_reply_becomes_thought() {
        let provider = ScriptedProvider::new(&[
            "Let me think about this in prose.",
            r#"{"type":"complete","result":"ok"}"#,
        ]);
        let mut agent = agent(provider, 5);

        agent.execute("Do something vague").await.unwrap();

        let messages = contents(&agent);
        assert_eq!(messages[1], (Role::Assistant, "Let me think about this in prose.".to_string()));
        assert!(agent.plan().unwrap().is_complete());
    }

    #[tokio::test]
    async fn test_oracle_unavailable_is_fatal() {
        let mut agent = agent(Arc::new(OfflineProvider), 5);

        let err = agent.execute("Calculate 1+1").await.unwrap_err();

        assert!(matches!(err, AgentError::DecisionOracle(msg) if msg.contains("connection refused")));
        assert_eq!(contents(&agent), vec![(Role::User, "Calculate 1+1".to_string())]);
        assert!(agent.plan().is_some());
    }

    #[tokio::test]
    async fn test_decision_timeout() {
        let mut agent = AgentBuilder::new()
            .provider(Arc::new(SlowProvider))
            .decision_timeout(Duration::from_millis(5))
            .build()
            .unwrap();

        let err = agent.execute("Anything").await.unwrap_err();
        assert!(matches!(err, AgentError::DecisionOracle(_)));
    }

    #[tokio::test]
    async fn test_context_uses_recent_history_window() {
        let provider = ScriptedProvider::new(&[
            r#"{"type":"think","thought":"t1"}"#,
            r#"{"type":"think","thought":"t2"}"#,
            r#"{"type":"think","thought":"t3"}"#,
            r#"{"type":"think","thought":"t4"}"#,
            r#"{"type":"think","thought":"t5"}"#,
            r#"{"type":"think","thought":"t6"}"#,
        ]);
        let mut agent = agent(provider.clone(), 7);

        agent.execute("Think a lot").await.unwrap();

        let last = provider.contexts().pop().unwrap();
        assert!(last.contains("Goal: Think a lot"));
        assert!(last.contains("assistant: t6"));
        assert!(last.contains("assistant: t2"));
        assert!(!last.contains("assistant: t1"));
        assert!(!last.contains("user: Think a lot"));
    }

    #[tokio::test]
    async fn test_reset_clears_memory_but_keeps_plan() {
        let provider = ScriptedProvider::new(&[r#"{"type":"complete","result":"4"}"#]);
        let mut agent = agent(provider, 3);
        agent.execute("Calculate 2+2").await.unwrap();

        agent.reset();

        assert!(agent.memory().messages().is_empty());
        assert!(agent.memory().tool_usage().is_empty());
        assert!(agent.plan_summary().starts_with("Goal: Calculate 2+2"));
    }

    #[test]
    fn test_plan_summary_without_plan() {
        let agent = agent(Arc::new(OfflineProvider), 1);
        assert_eq!(agent.plan_summary(), "No active plan");
    }

    #[test]
    fn test_builder_requires_provider() {
        assert!(matches!(AgentBuilder::new().build(), Err(AgentError::Config(_))));
        assert!(matches!(
            AgentBuilder::new().provider(Arc::new(OfflineProvider)).temperature(5.0).build(),
            Err(AgentError::Config(_))
        ));
    }
}
