//! Tool Executor
//!
//! Runs a single tool invocation with bounded retries and exponential
//! backoff, and keeps a ledger of outcomes for statistics and auditing.
//! Only the final outcome of an invocation is recorded, never the
//! intermediate failed attempts.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::tool::{Tool, ToolCall, ToolResult};

/// Retry behaviour for tool invocations
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Wait after the first failed attempt
    pub base_delay: Duration,

    /// Upper bound for any single wait
    pub max_delay: Duration,

    /// Growth factor between consecutive waits
    pub backoff_multiplier: f64,

    /// Per-attempt time limit. A timed out attempt counts as a failure.
    #[serde(default)]
    pub tool_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            tool_timeout: None,
        }
    }
}

impl RetryPolicy {
    /// No waiting between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Wait before the retry that follows failed attempt number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let secs = self.base_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        let cap = self.max_delay.as_secs_f64();

        if secs.is_finite() && secs >= 0.0 {
            Duration::from_secs_f64(secs.min(cap))
        } else {
            self.max_delay
        }
    }
}

/// Ledger entry for one tool invocation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub timestamp: DateTime<Utc>,
    pub tool_name: String,
    pub parameters: HashMap<String, serde_json::Value>,
    pub result: Option<String>,
    pub success: bool,
    pub error: Option<String>,
}

/// Aggregate view of the ledger
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStats {
    pub total_executions: usize,
    pub successful: usize,
    pub failed: usize,
    /// `successful / total_executions`, 0 when nothing ran
    pub success_rate: f64,
    pub tool_usage: BTreeMap<String, usize>,
}

/// Executes tools with retry logic, error handling, and logging
#[derive(Debug, Default)]
pub struct ToolExecutor {
    policy: RetryPolicy,
    history: Vec<ExecutionRecord>,
}

impl ToolExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            history: Vec::new(),
        }
    }

    /// Execute a tool, retrying failed invocations with exponential backoff.
    ///
    /// Parameter names that the tool does not declare are a usage error and
    /// are returned as [`AgentError::ToolValidation`] without retrying. A
    /// result the tool itself marks as failed is recorded as a failure and
    /// returned as is, also without retrying. Once the attempts are exhausted
    /// the last error is returned as [`AgentError::ToolExecution`].
    pub async fn execute_with_retry(
        &mut self,
        tool: &dyn Tool,
        parameters: &HashMap<String, serde_json::Value>,
    ) -> Result<ToolResult> {
        let name = tool.schema().name;
        let call = ToolCall::new(&name, parameters.clone());

        tracing::info!(tool = %name, "Executing tool");
        tracing::debug!(tool = %name, ?parameters, "Tool parameters");

        if let Err(e) = tool.validate(&call) {
            tracing::error!(tool = %name, error = %e, "Tool call rejected");
            self.record(&name, parameters, None, Some(e.to_string()));
            return Err(e);
        }

        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.invoke(tool, &call).await {
                // the tool ran and reported its own failure; same input, same answer
                Ok(result) if !result.success => {
                    tracing::warn!(tool = %name, attempt, output = %result.output, "Tool reported failure");
                    self.record(&name, parameters, None, Some(result.output.clone()));
                    return Ok(result);
                }
                Ok(result) => {
                    tracing::info!(tool = %name, attempt, "Tool execution successful");
                    self.record(&name, parameters, Some(result.output.clone()), None);
                    return Ok(result);
                }
                Err(e) if attempt < max_attempts && e.is_retryable() => {
                    let delay = self.policy.delay_for(attempt);
                    tracing::warn!(
                        tool = %name,
                        attempt,
                        max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "Tool execution failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::error!(tool = %name, attempt, error = %e, "Tool execution failed");
                    let message = e.to_string();
                    self.record(&name, parameters, None, Some(message.clone()));
                    return Err(AgentError::ToolExecution {
                        tool: name,
                        attempts: attempt,
                        message,
                    });
                }
            }
        }
    }

    /// Execute a tool, returning `default_value` if it ultimately fails
    pub async fn execute_safe(
        &mut self,
        tool: &dyn Tool,
        parameters: &HashMap<String, serde_json::Value>,
        default_value: ToolResult,
    ) -> ToolResult {
        match self.execute_with_retry(tool, parameters).await {
            Ok(result) if result.success => result,
            Ok(result) => {
                tracing::warn!(error = %result.output, fallback = %default_value.output, "Tool failed, returning default");
                default_value
            }
            Err(e) => {
                tracing::warn!(error = %e, fallback = %default_value.output, "Tool execution failed, returning default");
                default_value
            }
        }
    }

    async fn invoke(&self, tool: &dyn Tool, call: &ToolCall) -> Result<ToolResult> {
        match self.policy.tool_timeout {
            Some(limit) => tokio::time::timeout(limit, tool.execute(call))
                .await
                .map_err(|_| AgentError::Other(format!("timed out after {limit:?}")))?,
            None => tool.execute(call).await,
        }
    }

    fn record(
        &mut self,
        tool_name: &str,
        parameters: &HashMap<String, serde_json::Value>,
        result: Option<String>,
        error: Option<String>,
    ) {
        self.history.push(ExecutionRecord {
            timestamp: Utc::now(),
            tool_name: tool_name.to_string(),
            parameters: parameters.clone(),
            success: error.is_none(),
            result,
            error,
        });
    }

    /// Get statistics about tool executions
    pub fn execution_stats(&self) -> ExecutionStats {
        let total = self.history.len();
        let successful = self.history.iter().filter(|r| r.success).count();

        let mut tool_usage = BTreeMap::new();
        for record in &self.history {
            *tool_usage.entry(record.tool_name.clone()).or_insert(0) += 1;
        }

        #[allow(clippy::cast_precision_loss)]
        let success_rate = if total > 0 {
            successful as f64 / total as f64
        } else {
            0.0
        };

        ExecutionStats {
            total_executions: total,
            successful,
            failed: total - successful,
            success_rate,
            tool_usage,
        }
    }

    /// The ledger, oldest first
    pub fn history(&self) -> &[ExecutionRecord] {
        &self.history
    }

    /// Clear execution history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::CalculatorTool;
    use crate::tool::{ParameterSchema, ToolSchema};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Adds `x` and `y`, failing the first `failures` calls
    struct FlakyAdder {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyAdder {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Tool for FlakyAdder {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "adder".into(),
                description: "Adds two numbers".into(),
                parameters: vec![
                    ParameterSchema::required("x", "first"),
                    ParameterSchema::required("y", "second"),
                ],
            }
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= self.failures {
                return Err(AgentError::Other(format!("transient failure #{n}")));
            }
            let x = call.arguments["x"].as_i64().unwrap_or_default();
            let y = call.arguments["y"].as_i64().unwrap_or_default();
            Ok(ToolResult::success("adder", (x + y).to_string()))
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            ..RetryPolicy::default()
        }
    }

    fn params() -> HashMap<String, serde_json::Value> {
        HashMap::from([("x".to_string(), json!(5)), ("y".to_string(), json!(3))])
    }

    #[test]
    fn test_default_backoff_curve() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(3), Duration::from_secs(8));
        assert_eq!(policy.delay_for(4), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_success_first_try() {
        let mut executor = ToolExecutor::new(fast_policy());
        let result = executor.execute_with_retry(&FlakyAdder::new(0), &params()).await.unwrap();

        assert_eq!(result.output, "8");
        assert_eq!(executor.history().len(), 1);
        assert_eq!(executor.history()[0].result.as_deref(), Some("8"));
    }

    #[tokio::test]
    async fn test_fails_twice_then_succeeds() {
        let tool = FlakyAdder::new(2);
        let mut executor = ToolExecutor::new(fast_policy());

        let result = executor.execute_with_retry(&tool, &params()).await.unwrap();

        assert_eq!(result.output, "8");
        assert_eq!(tool.calls(), 3);
        assert_eq!(executor.history().len(), 1);
        assert!(executor.history()[0].success);
    }

    #[tokio::test]
    async fn test_always_failing_exhausts_attempts() {
        let tool = FlakyAdder::new(u32::MAX);
        let mut executor = ToolExecutor::new(fast_policy());

        let err = executor.execute_with_retry(&tool, &params()).await.unwrap_err();

        assert_eq!(tool.calls(), 3);
        match err {
            AgentError::ToolExecution { tool, attempts, message } => {
                assert_eq!(tool, "adder");
                assert_eq!(attempts, 3);
                assert!(message.contains("#3"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let ledger = executor.history();
        assert_eq!(ledger.len(), 1);
        assert!(!ledger[0].success);
        assert!(ledger[0].result.is_none());
        assert!(ledger[0].error.as_deref().unwrap().contains("#3"));
    }

    #[tokio::test]
    async fn test_unexpected_parameter_is_not_retried() {
        let tool = FlakyAdder::new(0);
        let mut executor = ToolExecutor::new(fast_policy());
        let mut bad = params();
        bad.insert("z".into(), json!(1));

        let err = executor.execute_with_retry(&tool, &bad).await.unwrap_err();

        assert!(matches!(err, AgentError::ToolValidation(_)));
        assert_eq!(tool.calls(), 0);
        assert_eq!(executor.execution_stats().failed, 1);
    }

    #[tokio::test]
    async fn test_execute_safe_returns_default() {
        let mut executor = ToolExecutor::new(RetryPolicy::immediate(3));
        let fallback = ToolResult::failure("adder", "unavailable");

        let result = executor
            .execute_safe(&FlakyAdder::new(u32::MAX), &params(), fallback.clone())
            .await;

        assert_eq!(result, fallback);
    }

    #[tokio::test]
    async fn test_tool_reported_failure_is_recorded_as_failed() {
        let mut executor = ToolExecutor::new(fast_policy());
        let expression = HashMap::from([("expression".to_string(), json!("1 / 0"))]);

        let result = executor.execute_with_retry(&CalculatorTool, &expression).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.output, "Calculation error: division by zero");
        let ledger = executor.history();
        assert_eq!(ledger.len(), 1);
        assert!(!ledger[0].success);
        assert!(ledger[0].result.is_none());
        assert_eq!(ledger[0].error.as_deref(), Some("Calculation error: division by zero"));

        let stats = executor.execution_stats();
        assert_eq!((stats.successful, stats.failed), (0, 1));
    }

    #[tokio::test]
    async fn test_execute_safe_falls_back_on_tool_reported_failure() {
        let mut executor = ToolExecutor::new(fast_policy());
        let expression = HashMap::from([("expression".to_string(), json!("1 / 0"))]);
        let fallback = ToolResult::success("calculator", "Result: unknown");

        let result = executor.execute_safe(&CalculatorTool, &expression, fallback.clone()).await;

        assert_eq!(result, fallback);
        assert_eq!(executor.execution_stats().failed, 1);
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failure() {
        struct Slow;

        #[async_trait]
        impl Tool for Slow {
            fn schema(&self) -> ToolSchema {
                ToolSchema {
                    name: "slow".into(),
                    description: "Never finishes in time".into(),
                    parameters: vec![],
                }
            }

            async fn execute(&self, _call: &ToolCall) -> Result<ToolResult> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(ToolResult::success("slow", "done"))
            }
        }

        let policy = RetryPolicy {
            tool_timeout: Some(Duration::from_millis(5)),
            ..RetryPolicy::immediate(2)
        };
        let mut executor = ToolExecutor::new(policy);

        let err = executor.execute_with_retry(&Slow, &HashMap::new()).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolExecution { attempts: 2, .. }));
    }

    #[tokio::test]
    async fn test_execution_stats() {
        let mut executor = ToolExecutor::new(RetryPolicy::immediate(3));
        assert_eq!(executor.execution_stats().success_rate, 0.0);

        let good = FlakyAdder::new(0);
        for _ in 0..3 {
            executor.execute_with_retry(&good, &params()).await.unwrap();
        }
        let bad = FlakyAdder::new(u32::MAX);
        for _ in 0..2 {
            executor.execute_with_retry(&bad, &params()).await.unwrap_err();
        }

        let stats = executor.execution_stats();
        assert_eq!(stats.total_executions, 5);
        assert_eq!(stats.successful, 3);
        assert_eq!(stats.failed, 2);
        assert!((stats.success_rate - 0.6).abs() < f64::EPSILON);
        assert_eq!(stats.tool_usage["adder"], 5);

        executor.clear_history();
        assert_eq!(executor.execution_stats().total_executions, 0);
    }
}
