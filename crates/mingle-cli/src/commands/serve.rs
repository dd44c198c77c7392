//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "MINGLE_PORT", default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "MINGLE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to mingle-serve.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, db_path: &Path) -> Result<()> {
    let pool = Arc::new(mingle_db::init_pool(db_path)?);

    println!();
    println!("  {} {}", "Mingle".cyan().bold(), "Web Server".bold());
    println!();
    println!(
        "  {}        http://{}:{}/api",
        "API".green(),
        args.host,
        args.port
    );
    println!(
        "  {}  ws://{}:{}/ws",
        "WebSocket".green(),
        args.host,
        args.port
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    mingle_web::run_server(pool, &args.host, args.port).await?;

    Ok(())
}
