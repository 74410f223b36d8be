//! Unified error handling for Dirsnap Core.
//!
//! This module provides a unified error type that wraps domain and
//! application errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

// Category lives with the domain; re-exported here so adapters and the CLI
// only need `crate::error`.
pub use crate::domain::ErrorCategory;

/// Root error type for Dirsnap Core operations.
///
/// This enum wraps all possible errors that can occur when using
/// dirsnap-core, providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum DirsnapError {
    /// Errors from the domain layer (business logic violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl DirsnapError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
        }
    }
}

/// Convenient result type alias.
pub type DirsnapResult<T> = Result<T, DirsnapError>;
