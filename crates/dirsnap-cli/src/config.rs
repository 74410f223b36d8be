//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Home directory resolution (highest priority first)
//!
//! 1. `DIRSNAP_HOME` environment variable (also keeps tests hermetic)
//! 2. `home` key in the config file
//! 3. Platform data dir via `directories::ProjectDirs`
//! 4. `~/.dirsnap`
//!
//! The home directory holds everything dirsnap persists:
//!
//! ```text
//! <home>/templates.db   — the catalog
//! <home>/templates/     — one <name>.zip per template
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// File name of the catalog database inside the home directory.
const CATALOG_FILE: &str = "templates.db";

/// Subdirectory of the home directory that holds the archives.
const TEMPLATES_DIR: &str = "templates";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Override for the dirsnap home directory.
    pub home: Option<PathBuf>,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// `config_file` is the path the user passed via `--config`.  An
    /// explicit path must exist and parse; the default location is only
    /// read when present.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        match config_file {
            Some(path) => Self::read_file(path),
            None => {
                let path = Self::config_path();
                if path.is_file() {
                    Self::read_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read_file(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CliError::ConfigError {
            message: format!("cannot read {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        toml::from_str(&text).map_err(|e| CliError::ConfigError {
            message: format!("cannot parse {}", path.display()),
            source: Some(Box::new(e)),
        })
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.dirsnap.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "dirsnap", "dirsnap")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".dirsnap.toml"))
    }

    /// The resolved dirsnap home directory (see module docs for the
    /// precedence order).
    pub fn home(&self) -> PathBuf {
        if let Some(home) = std::env::var_os("DIRSNAP_HOME") {
            return PathBuf::from(home);
        }
        if let Some(home) = &self.home {
            return home.clone();
        }
        directories::ProjectDirs::from("com", "dirsnap", "dirsnap")
            .map(|d| d.data_dir().to_path_buf())
            .or_else(|| {
                directories::UserDirs::new().map(|u| u.home_dir().join(".dirsnap"))
            })
            .unwrap_or_else(|| PathBuf::from(".dirsnap"))
    }

    /// Path of the catalog database file.
    pub fn db_path(&self) -> PathBuf {
        self.home().join(CATALOG_FILE)
    }

    /// Path of the directory holding the template archives.
    pub fn templates_dir(&self) -> PathBuf {
        self.home().join(TEMPLATES_DIR)
    }

    /// Create the home directory layout if it does not exist yet.
    pub fn ensure_layout(&self) -> CliResult<()> {
        std::fs::create_dir_all(self.templates_dir()).map_err(|e| CliError::IoError {
            message: format!("cannot create {}", self.templates_dir().display()),
            source: e,
        })
    }
}
