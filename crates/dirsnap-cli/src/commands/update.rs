//! Implementation of the `dirsnap update` command.

use tracing::{debug, instrument};

use crate::{
    cli::{UpdateArgs, global::GlobalArgs},
    commands::{absolutize, build_service, parse_name},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `dirsnap update` command: re-snapshot the source directory
/// into an existing template, refreshing its timestamp.
#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(
    args: UpdateArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let name = parse_name(&args.name)?;
    let source = absolutize(&args.path)?;

    debug!(template = %name, source = %source.display(), "Update requested");

    output.header(&format!("Updating template '{name}'"))?;

    let service = build_service(&config)?;
    service.update(&name, &source)?;

    output.success(&format!(
        "Template '{name}' refreshed from {}",
        source.display()
    ))?;
    Ok(())
}
