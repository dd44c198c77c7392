//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod agent;
pub mod serve;
pub mod stats;

/// Mingle - Social Matchmaking for Agents
#[derive(Parser)]
#[command(name = "mingle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the SQLite database
    #[arg(long, global = true, env = "MINGLE_DB", default_value = "mingle.db")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(serve::ServeArgs),

    /// Inspect registered agents
    #[command(subcommand)]
    Agent(agent::AgentCommands),

    /// Show aggregate stats
    Stats,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args, &self.db).await,
            Commands::Agent(cmd) => agent::execute(cmd, &self.db),
            Commands::Stats => stats::execute(&self.db),
        }
    }
}
