//! Command handlers.
//!
//! One module per subcommand, each exposing
//! `execute(args, global, config, output)`.  Shared composition-root
//! helpers live here: every handler gets its `TemplateService` wired the
//! same way.

use std::path::{Path, PathBuf};

use dirsnap_adapters::{SqliteCatalog, ZipCodec};
use dirsnap_core::{application::TemplateService, domain::TemplateName};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod clear;
pub mod completions;
pub mod create;
pub mod delete;
pub mod list;
pub mod snap;
pub mod update;

/// Build the template service over the real adapters.
///
/// Creates the home layout if needed and opens the catalog; the handle is
/// owned by the returned service and released when the process exits.
pub fn build_service(config: &AppConfig) -> CliResult<TemplateService> {
    config.ensure_layout()?;

    let catalog = SqliteCatalog::open(&config.db_path()).map_err(CliError::Core)?;
    let codec = ZipCodec::new();

    Ok(TemplateService::new(
        Box::new(catalog),
        Box::new(codec),
        config.templates_dir(),
    ))
}

/// Normalize a user-supplied template name (trim + lowercase + validate).
pub fn parse_name(raw: &str) -> CliResult<TemplateName> {
    TemplateName::parse(raw).map_err(|e| CliError::Core(e.into()))
}

/// Absolutize a user-supplied directory path against the current working
/// directory, without requiring it to exist.
pub fn absolutize(path: &Path) -> CliResult<PathBuf> {
    std::path::absolute(path).map_err(|e| CliError::IoError {
        message: format!("cannot resolve path {}", path.display()),
        source: e,
    })
}
