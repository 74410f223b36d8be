//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The named template has no catalog row.
    #[error("template not found: '{name}'")]
    NotFound { name: String },

    /// Snapshot attempted with a name that already has a catalog row.
    #[error("template '{name}' already exists")]
    AlreadyExists { name: String },

    /// Archive read/write failed (missing source dir, unreadable or
    /// corrupt archive, permission denial).
    #[error("archive error at {path}: {reason}")]
    Archive { path: PathBuf, reason: String },

    /// Catalog statement failed (bad database file, locked store, etc.).
    #[error("catalog error: {reason}")]
    Catalog { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { name } => vec![
                format!("No template named '{}' in the catalog", name),
                "List stored templates: dirsnap list".into(),
                format!("Create it first: dirsnap snap --name {}", name),
            ],
            Self::AlreadyExists { name } => vec![
                format!("A template named '{}' already exists", name),
                format!("Refresh it instead: dirsnap update --name {}", name),
                "Or pick a different name".into(),
            ],
            Self::Archive { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the path exists and is readable".into(),
                "Check that you have write permissions".into(),
            ],
            Self::Catalog { reason } => vec![
                format!("Catalog access failed: {}", reason),
                "Check the catalog file is not corrupted or locked".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::AlreadyExists { .. } => ErrorCategory::Conflict,
            Self::Archive { .. } | Self::Catalog { .. } => ErrorCategory::Internal,
        }
    }
}
