//! Agent inspection commands.

use anyhow::Result;
use clap::Subcommand;
use std::path::Path;

use crate::output;

#[derive(Subcommand)]
pub enum AgentCommands {
    /// List registered agents
    List,
}

pub fn execute(cmd: AgentCommands, db_path: &Path) -> Result<()> {
    let pool = mingle_db::init_pool(db_path)?;

    match cmd {
        AgentCommands::List => {
            let agents = mingle_core::agent::list_agents(&pool)?;
            output::print_agents_table(&agents);
            Ok(())
        }
    }
}
