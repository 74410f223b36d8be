//! Implementation of the `dirsnap snap` command.
//!
//! Responsibility: normalize the name, resolve the source directory, call
//! the core snapshot operation, and display results.  No business logic
//! lives here.

use tracing::{debug, instrument};

use crate::{
    cli::{SnapArgs, global::GlobalArgs},
    commands::{absolutize, build_service, parse_name},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `dirsnap snap` command.
#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(
    args: SnapArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let name = parse_name(&args.name)?;
    let source = absolutize(&args.path)?;

    debug!(template = %name, source = %source.display(), "Snapshot requested");

    output.header(&format!("Saving template '{name}'"))?;

    let service = build_service(&config)?;
    service.snapshot(&name, &source)?;

    output.success(&format!(
        "Template '{name}' created from {}",
        source.display()
    ))?;
    Ok(())
}
