//! Autonomous task agent CLI
//!
//! Runs a single goal, an interactive goal loop, or one of the scripted
//! demos against a local Ollama or an OpenAI-compatible endpoint.

mod demo;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use agent_core::{Agent, AgentBuilder, ExecutionOutcome, LlmProvider, ToolRegistry};
use agent_runtime::{OllamaProvider, OpenAiProvider};

use crate::demo::Demo;

#[derive(Parser)]
#[command(
    name = "agent",
    about = "Autonomous task-execution agent",
    version,
    subcommand_precedence_over_arg = true
)]
struct Cli {
    /// Goal to pursue
    goal: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,

    /// Read goals from stdin until quit/exit/q
    #[arg(short, long)]
    interactive: bool,

    /// Decision oracle backend
    #[arg(long, value_enum, env = "AGENT_PROVIDER", default_value = "ollama")]
    provider: ProviderKind,

    /// Model name passed to the provider
    #[arg(long, env = "AGENT_MODEL", default_value = "llama3.2")]
    model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// Iteration budget per goal
    #[arg(long, default_value_t = 10)]
    max_iterations: usize,

    /// Load memory from this file before running
    #[arg(long)]
    load_memory: Option<PathBuf>,

    /// Save memory to this file afterwards
    #[arg(long)]
    save_memory: Option<PathBuf>,

    /// Print memory and tool execution statistics at the end
    #[arg(long)]
    stats: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scripted demo goal
    Demo {
        #[arg(value_enum)]
        name: Demo,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProviderKind {
    Ollama,
    Openai,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let provider = build_provider(cli.provider)?;
    match provider.health_check().await {
        Ok(true) => tracing::info!(provider = provider.name(), "Decision oracle reachable"),
        Ok(false) | Err(_) => {
            tracing::warn!(provider = provider.name(), "Decision oracle not reachable, goals will fail");
        }
    }

    let max_iterations = match &cli.command {
        Some(Command::Demo { name }) => name.max_iterations(),
        None => cli.max_iterations,
    };

    let mut agent = AgentBuilder::new()
        .provider(provider)
        .tools(ToolRegistry::with_builtins())
        .model(cli.model.clone())
        .temperature(cli.temperature)
        .max_iterations(max_iterations)
        .build()?;

    if let Some(path) = &cli.load_memory {
        agent
            .memory_mut()
            .load_from_file(path)
            .with_context(|| format!("loading memory from {}", path.display()))?;
        tracing::info!(path = %path.display(), "Memory loaded");
    }

    match (&cli.command, &cli.goal) {
        (Some(Command::Demo { name }), _) => {
            println!("=== {} ===\n", name.title());
            run_goal(&mut agent, name.goal()).await?;
        }
        (None, Some(goal)) => run_goal(&mut agent, goal).await?,
        (None, None) if cli.interactive => interactive(&mut agent).await?,
        (None, None) => anyhow::bail!("provide a goal, --interactive, or `demo <name>`"),
    }

    if let Some(path) = &cli.save_memory {
        agent
            .memory()
            .save_to_file(path)
            .with_context(|| format!("saving memory to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Memory saved");
    }

    if cli.stats {
        print_stats(&agent)?;
    }

    Ok(())
}

fn build_provider(kind: ProviderKind) -> anyhow::Result<Arc<dyn LlmProvider>> {
    Ok(match kind {
        ProviderKind::Ollama => Arc::new(OllamaProvider::from_env()),
        ProviderKind::Openai => Arc::new(OpenAiProvider::from_env()?),
    })
}

async fn run_goal(agent: &mut Agent, goal: &str) -> anyhow::Result<()> {
    let outcome = agent.execute(goal).await?;
    print_outcome(&outcome);
    Ok(())
}

async fn interactive(agent: &mut Agent) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("Interactive mode - type 'quit' to exit\n");

    loop {
        stdout.write_all(b"Enter your goal: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let goal = line.trim();

        if matches!(goal.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("Goodbye!");
            break;
        }
        if goal.is_empty() {
            continue;
        }

        // an unreachable oracle ends this goal, not the session
        if let Err(e) = agent.execute(goal).await.map(|o| print_outcome(&o)) {
            tracing::error!(error = %e, "Goal failed");
            println!("\n{}\n", e.user_message());
        }
    }

    Ok(())
}

fn print_outcome(outcome: &ExecutionOutcome) {
    let status = if outcome.success { "completed" } else { "stopped" };
    println!("\nResult: {}", outcome.result);
    println!("Status: {status} after {} iteration(s)", outcome.iterations);
    println!("Tools used: {:?}\n", outcome.tools_used);
}

fn print_stats(agent: &Agent) -> anyhow::Result<()> {
    println!("{}", agent.plan_summary());
    println!("Memory:\n{}", serde_json::to_string_pretty(&agent.memory().summary())?);
    println!("Tool executions:\n{}", serde_json::to_string_pretty(&agent.execution_stats())?);
    Ok(())
}
