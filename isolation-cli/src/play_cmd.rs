//! Play command - one game between two agents
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_search_config(), build_agents(), report_outcome()
//! - Level 3: agent_config()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use isolation_core::{Agent, Board, Heuristic, SearchConfig};
use isolation_match::{create_agent, AgentConfig, AgentKind, GameEnd, GameOutcome, GameRunner, MatchConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Agent moving first (minimax, alpha-beta, random)
    #[arg(long, default_value = "alpha-beta")]
    pub first: AgentKind,

    /// Agent moving second (minimax, alpha-beta, random)
    #[arg(long, default_value = "random")]
    pub second: AgentKind,

    /// Board width
    #[arg(long, default_value = "7")]
    pub width: i32,

    /// Board height
    #[arg(long, default_value = "7")]
    pub height: i32,

    /// Per-move time limit in milliseconds
    #[arg(long, default_value = "150")]
    pub time_limit: u64,

    /// Fixed search depth (minimax)
    #[arg(long, default_value = "3")]
    pub depth: u32,

    /// Iterative-deepening cap (alpha-beta)
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Heuristic (weighted-ratio, weighted-diff, mobility-ratio)
    #[arg(long, default_value = "weighted-ratio")]
    pub heuristic: Heuristic,

    /// Remaining time (ms) at which search stops
    #[arg(long, default_value = "10")]
    pub timeout: f64,

    /// Search config JSON file; replaces the search flags above
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Resolve search settings
/// 2. Build both agents and the runner
/// 3. Play and report
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let search = build_search_config(&args)?;
    let seed = seed.unwrap_or_else(rand::random);

    let runner = GameRunner::new(MatchConfig {
        width: args.width,
        height: args.height,
        time_limit_ms: args.time_limit,
        ..Default::default()
    })
    .context("Invalid match settings")?;

    let (mut first, mut second) = build_agents(&args, &search, seed)?;

    tracing::info!(seed, "Playing {} vs {}", first.name(), second.name());

    let outcome = runner.play(first.as_mut(), second.as_mut());
    report_outcome(&outcome, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Search settings from the config file, or from flags
fn build_search_config(args: &PlayArgs) -> Result<SearchConfig> {
    if let Some(path) = &args.config {
        return SearchConfig::load(path);
    }

    let config = SearchConfig {
        search_depth: args.depth,
        heuristic: args.heuristic,
        timeout_ms: args.timeout,
        max_depth: args.max_depth,
    };
    config.validate().context("Invalid search settings")?;
    Ok(config)
}

type BoxedAgent = Box<dyn Agent<Board>>;

/// Create both agents; the second gets the next seed
fn build_agents(args: &PlayArgs, search: &SearchConfig, seed: u64) -> Result<(BoxedAgent, BoxedAgent)> {
    let first = create_agent(&agent_config(args.first, search, seed))
        .with_context(|| format!("Failed to create first agent ({})", args.first.name()))?;
    let second = create_agent(&agent_config(args.second, search, seed.wrapping_add(1)))
        .with_context(|| format!("Failed to create second agent ({})", args.second.name()))?;
    Ok((first, second))
}

/// Print the outcome
fn report_outcome(outcome: &GameOutcome, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(outcome).context("Failed to serialize outcome")?;
        println!("{}", text);
    } else {
        print_text_outcome(outcome);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn agent_config(kind: AgentKind, search: &SearchConfig, seed: u64) -> AgentConfig {
    AgentConfig {
        kind,
        search: search.clone(),
        seed: Some(seed),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_text_outcome(outcome: &GameOutcome) {
    println!("\n=== Game Result ===");
    match outcome.winner {
        Some(winner) => println!("Winner: {:?}", winner),
        None => println!("No winner"),
    }
    println!("Ended:  {}", describe_end(&outcome.end));
    println!("Plies:  {}", outcome.plies());

    let moves: Vec<String> = outcome.moves.iter().map(|m| m.to_string()).collect();
    println!("Moves:  {}", moves.join(" "));
}

fn describe_end(end: &GameEnd) -> String {
    match end {
        GameEnd::Isolated => "loser had no legal moves".to_string(),
        GameEnd::Forfeit { reason } => format!("forfeit ({:?})", reason),
        GameEnd::MoveLimit => "move limit reached".to_string(),
    }
}
