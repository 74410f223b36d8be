//! Implementation of the `dirsnap clear` command.
//!
//! Destructive bulk delete; prompts before acting unless `--yes`.

use tracing::{info, instrument};

use crate::{
    cli::{ClearArgs, global::GlobalArgs},
    commands::build_service,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `dirsnap clear` command.
#[instrument(skip_all)]
pub fn execute(
    args: ClearArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = build_service(&config)?;

    let total = service.count()?;
    if total == 0 {
        output.info("No templates to delete")?;
        return Ok(());
    }

    // Destructive: always confirm unless --yes. A closed/empty stdin reads
    // as the default "no".
    if !args.yes && !confirm(total)? {
        return Err(CliError::Cancelled);
    }

    let deleted = service.clear()?;
    info!(deleted, "Clear completed");

    output.success(&format!("Deleted {deleted} template(s)"))?;
    Ok(())
}

/// Destructive-action prompt; defaults to **no**.
fn confirm(total: u64) -> CliResult<bool> {
    use std::io::{self, Write};

    print!("About to delete {total} template(s). Are you sure you want to continue? [y/N] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input == "y" || input == "yes")
}
