//! Implementation of the `dirsnap create` command.

use tracing::{debug, instrument};

use crate::{
    cli::{CreateArgs, global::GlobalArgs},
    commands::{absolutize, build_service, parse_name},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `dirsnap create` command: clone a stored template into the
/// destination directory.
#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(
    args: CreateArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let name = parse_name(&args.name)?;
    let dest = absolutize(&args.path)?;

    debug!(template = %name, dest = %dest.display(), "Clone requested");

    output.header(&format!("Cloning template '{name}'"))?;

    let service = build_service(&config)?;
    service.clone_to(&name, &dest)?;

    output.success(&format!(
        "Template '{name}' cloned into {}",
        dest.display()
    ))?;
    Ok(())
}
