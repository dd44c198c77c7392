//! Aggregate stats command.

use anyhow::Result;
use std::path::Path;

use crate::output;

pub fn execute(db_path: &Path) -> Result<()> {
    let pool = mingle_db::init_pool(db_path)?;
    let stats = mingle_core::stats::get_stats(&pool)?;
    output::print_stats(&stats);
    Ok(())
}
