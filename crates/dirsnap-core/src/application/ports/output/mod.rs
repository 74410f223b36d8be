//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `dirsnap-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{TemplateName, TemplatePatch, TemplateRecord};
use crate::error::DirsnapResult;

/// Port for the template metadata catalog.
///
/// Implemented by:
/// - `dirsnap_adapters::catalog::SqliteCatalog` (production)
/// - `dirsnap_adapters::catalog::MemoryCatalog` (testing)
///
/// ## Design Notes
///
/// - Every mutating call commits immediately; there is no transaction
///   scoping across calls.
/// - The handle is owned by the adapter value — opened at startup by the
///   composition root and dropped at process exit, never a global.
pub trait Catalog: Send + Sync {
    /// Check whether a row exists for `name`.
    fn exists(&self, name: &TemplateName) -> DirsnapResult<bool>;

    /// Fetch the row for `name`, or `None` if absent.
    fn get(&self, name: &TemplateName) -> DirsnapResult<Option<TemplateRecord>>;

    /// Insert a new row. A single atomic insert: a primary-key clash is
    /// surfaced as `ApplicationError::AlreadyExists`, never a silent
    /// overwrite.
    fn insert(&self, record: &TemplateRecord) -> DirsnapResult<()>;

    /// Partially update the row for `name`; fields omitted from the patch
    /// retain their previous value. `NotFound` if the row is absent.
    fn update(&self, name: &TemplateName, patch: &TemplatePatch) -> DirsnapResult<()>;

    /// Remove the row for `name`. No-op-safe at the SQL level; callers
    /// check existence first when they need a `NotFound`.
    fn delete(&self, name: &TemplateName) -> DirsnapResult<()>;

    /// All rows, in insertion order.
    fn list_all(&self) -> DirsnapResult<Vec<TemplateRecord>>;

    /// Number of rows.
    fn count(&self) -> DirsnapResult<u64>;
}

/// Port for archive encoding and decoding.
///
/// Implemented by:
/// - `dirsnap_adapters::archive::ZipCodec` (production)
///
/// The only format guarantee is the round-trip law: unpacking a packed
/// tree reproduces its relative paths and file bytes.
pub trait ArchiveCodec: Send + Sync {
    /// Recursively pack every entry under `source_dir` into a new archive
    /// at `dest_archive`, preserving paths relative to `source_dir`.
    /// Overwrites an existing destination file.
    fn pack(&self, source_dir: &Path, dest_archive: &Path) -> DirsnapResult<()>;

    /// Extract all entries from `archive` into `dest_dir`, creating the
    /// destination if absent.
    fn unpack(&self, archive: &Path, dest_dir: &Path) -> DirsnapResult<()>;

    /// The ordered sequence of entry names stored in `archive`, for
    /// display only; nothing is extracted.
    fn list_entries(&self, archive: &Path) -> DirsnapResult<Vec<String>>;

    /// Move a staged archive into its final location (rename). Used to
    /// commit the catalog row before the archive lands at its real path.
    fn promote(&self, staged: &Path, dest: &Path) -> DirsnapResult<()>;

    /// Delete an archive file. A missing file is not an error.
    fn remove(&self, archive: &Path) -> DirsnapResult<()>;
}
