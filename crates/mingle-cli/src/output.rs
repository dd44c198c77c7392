//! Terminal output formatting.

use colored::Colorize;
use mingle_core::agent::model::{Agent, AgentStatus};
use mingle_core::stats::StoreStats;

/// Print agents as a table.
pub fn print_agents_table(agents: &[Agent]) {
    if agents.is_empty() {
        println!("{}", "No agents registered.".dimmed());
        return;
    }

    println!(
        "{:<36} {:<20} {:<8} {:<28}",
        "ID", "Name", "Status", "Interests"
    );
    println!("{}", "-".repeat(94));

    for agent in agents {
        let status_colored = match agent.status {
            AgentStatus::Online => "online".green(),
            AgentStatus::Offline => "offline".dimmed(),
        };

        println!(
            "{:<36} {:<20} {:<8} {:<28}",
            agent.id,
            truncate(&agent.name, 18),
            status_colored,
            truncate(&agent.interests.join(", "), 26)
        );
    }
}

/// Print aggregate stats.
pub fn print_stats(stats: &StoreStats) {
    println!("{}: {}", "Agents".bold(), stats.total_agents);
    println!(
        "{}: {}",
        "Active conversations".bold(),
        stats.active_conversations
    );
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
