//! Implementation of the `dirsnap delete` command.

use tracing::{debug, instrument};

use crate::{
    cli::{DeleteArgs, global::GlobalArgs},
    commands::{build_service, parse_name},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `dirsnap delete` command: remove the catalog row and the
/// backing archive.
#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(
    args: DeleteArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let name = parse_name(&args.name)?;

    debug!(template = %name, "Delete requested");

    let service = build_service(&config)?;
    service.delete(&name)?;

    output.success(&format!("Template '{name}' deleted"))?;
    Ok(())
}
