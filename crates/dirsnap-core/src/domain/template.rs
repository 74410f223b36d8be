//! Template entities: the normalized name and the catalog record.
//!
//! A template is a named snapshot of a directory tree — an archive file on
//! disk plus one catalog row describing it. The row is the source of truth;
//! the archive is derived data kept in lockstep by the application layer.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

// ── TemplateName ──────────────────────────────────────────────────────────────

/// A validated, normalized template name.
///
/// Construction goes through [`TemplateName::parse`], which trims whitespace
/// and lowercases — so two spellings of the same name always hit the same
/// catalog row. The inner string is guaranteed non-empty and free of path
/// separators, which keeps `<name>.zip` a safe file name inside the
/// templates directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateName(String);

impl TemplateName {
    /// Normalize and validate a raw, user-supplied name.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let name = raw.trim().to_lowercase();

        if name.is_empty() {
            return Err(DomainError::InvalidName {
                name: raw.into(),
                reason: "name cannot be empty".into(),
            });
        }
        if name.starts_with('.') {
            return Err(DomainError::InvalidName {
                name: raw.into(),
                reason: "name cannot start with '.'".into(),
            });
        }
        if name.contains('/') || name.contains('\\') {
            return Err(DomainError::InvalidName {
                name: raw.into(),
                reason: "name cannot contain path separators".into(),
            });
        }

        Ok(Self(name))
    }

    /// The normalized name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the backing archive: `<name>.zip`.
    pub fn archive_file_name(&self) -> String {
        format!("{}.zip", self.0)
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── TemplateRecord ────────────────────────────────────────────────────────────

/// One catalog row: the metadata for a stored template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    /// Unique template name (catalog primary key).
    pub name: TemplateName,
    /// Seconds since the Unix epoch; set at creation, overwritten on update.
    pub created: f64,
    /// Absolute path of the directory that was archived.
    pub src_path: PathBuf,
    /// Absolute path of the backing archive file.
    pub template_path: PathBuf,
}

impl TemplateRecord {
    pub fn new(
        name: TemplateName,
        created: f64,
        src_path: impl Into<PathBuf>,
        template_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name,
            created,
            src_path: src_path.into(),
            template_path: template_path.into(),
        }
    }
}

// ── TemplatePatch ─────────────────────────────────────────────────────────────

/// Partial update for a catalog row.
///
/// Fields left as `None` retain their previous value in the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplatePatch {
    pub created: Option<f64>,
    pub src_path: Option<PathBuf>,
    pub template_path: Option<PathBuf>,
}

impl TemplatePatch {
    /// A full refresh: new timestamp and both paths.
    pub fn refresh(
        created: f64,
        src_path: impl Into<PathBuf>,
        template_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            created: Some(created),
            src_path: Some(src_path.into()),
            template_path: Some(template_path.into()),
        }
    }

    /// Apply this patch to an existing record, producing the merged row.
    pub fn apply(&self, record: &TemplateRecord) -> TemplateRecord {
        TemplateRecord {
            name: record.name.clone(),
            created: self.created.unwrap_or(record.created),
            src_path: self
                .src_path
                .clone()
                .unwrap_or_else(|| record.src_path.clone()),
            template_path: self
                .template_path
                .clone()
                .unwrap_or_else(|| record.template_path.clone()),
        }
    }
}
