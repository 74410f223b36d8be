//! Template Service - main application orchestrator.
//!
//! This service coordinates the template lifecycle:
//! 1. Pack/unpack directory trees via the `ArchiveCodec` port
//! 2. Track metadata via the `Catalog` port
//! 3. Keep archive file and catalog row in lockstep
//!
//! It implements the driving port (incoming) and uses driven ports
//! (outgoing).
//!
//! ## Pair-write protocol
//!
//! The catalog is the source of truth, so a mutating operation must not
//! leave a committed row without its archive (or vice versa) on the happy
//! path. Snapshot and update therefore stage the archive next to its final
//! location, commit the catalog row, then promote the staged file with a
//! rename:
//!
//! ```text
//! pack(src, <name>.zip.tmp) → insert/update row → rename to <name>.zip
//! ```
//!
//! A failure before the row commits leaves only a staged temp file, which
//! is removed. The residual window (row committed, promote fails) is
//! repaired by the next `update` and detected lazily by `clone`.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ArchiveCodec, Catalog},
    },
    domain::{TemplateName, TemplatePatch, TemplateRecord},
    error::DirsnapResult,
};

/// Main template lifecycle service.
///
/// Owns its adapters and the templates directory; one instance is built by
/// the composition root per process invocation.
pub struct TemplateService {
    catalog: Box<dyn Catalog>,
    codec: Box<dyn ArchiveCodec>,
    templates_dir: PathBuf,
}

impl TemplateService {
    /// Create a new template service with the given adapters.
    ///
    /// `templates_dir` is the directory that holds one `<name>.zip` per
    /// template; the caller is responsible for creating it.
    pub fn new(
        catalog: Box<dyn Catalog>,
        codec: Box<dyn ArchiveCodec>,
        templates_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            catalog,
            codec,
            templates_dir: templates_dir.into(),
        }
    }

    /// Snapshot `source_dir` into a new template named `name`.
    ///
    /// Fails with `AlreadyExists` if the name already has a catalog row,
    /// leaving the prior archive and row untouched.
    #[instrument(skip_all, fields(template = %name, source = %source_dir.display()))]
    pub fn snapshot(&self, name: &TemplateName, source_dir: &Path) -> DirsnapResult<()> {
        let dest = self.archive_path(name);
        let staged = staging_path(&dest);

        if let Err(e) = self.codec.pack(source_dir, &staged) {
            self.discard_staged(&staged);
            return Err(e);
        }

        let record = TemplateRecord::new(name.clone(), now_epoch(), source_dir, &dest);
        if let Err(e) = self.catalog.insert(&record) {
            self.discard_staged(&staged);
            return Err(e);
        }

        self.codec.promote(&staged, &dest)?;

        info!(archive = %dest.display(), "Template created");
        Ok(())
    }

    /// Unpack the template named `name` into `dest_dir`.
    ///
    /// Archive readability is only checked here (lazy failure): a row whose
    /// archive file has gone missing surfaces as an archive error.
    #[instrument(skip_all, fields(template = %name, dest = %dest_dir.display()))]
    pub fn clone_to(&self, name: &TemplateName, dest_dir: &Path) -> DirsnapResult<()> {
        let record = self.require(name)?;
        self.codec.unpack(&record.template_path, dest_dir)?;

        info!(archive = %record.template_path.display(), "Template cloned");
        Ok(())
    }

    /// Re-snapshot `source_dir` into the existing template named `name`,
    /// refreshing the row's timestamp and paths.
    #[instrument(skip_all, fields(template = %name, source = %source_dir.display()))]
    pub fn update(&self, name: &TemplateName, source_dir: &Path) -> DirsnapResult<()> {
        // NotFound before any packing work happens.
        self.require(name)?;

        let dest = self.archive_path(name);
        let staged = staging_path(&dest);

        if let Err(e) = self.codec.pack(source_dir, &staged) {
            self.discard_staged(&staged);
            return Err(e);
        }

        let patch = TemplatePatch::refresh(now_epoch(), source_dir, &dest);
        if let Err(e) = self.catalog.update(name, &patch) {
            self.discard_staged(&staged);
            return Err(e);
        }

        self.codec.promote(&staged, &dest)?;

        info!(archive = %dest.display(), "Template updated");
        Ok(())
    }

    /// Delete the template named `name`: row first, then the archive file.
    ///
    /// The row must go even if the file unlink fails — the catalog is the
    /// source of truth. A pre-missing archive is tolerated.
    #[instrument(skip_all, fields(template = %name))]
    pub fn delete(&self, name: &TemplateName) -> DirsnapResult<()> {
        let record = self.require(name)?;

        self.catalog.delete(name)?;

        if let Err(e) = self.codec.remove(&record.template_path) {
            warn!(
                error = %e,
                archive = %record.template_path.display(),
                "Archive removal failed; row already deleted"
            );
        }

        info!("Template deleted");
        Ok(())
    }

    /// All template records, in insertion order.
    pub fn list_all(&self) -> DirsnapResult<Vec<TemplateRecord>> {
        self.catalog.list_all()
    }

    /// One template's record plus the entry names stored in its archive.
    pub fn list_files(&self, name: &TemplateName) -> DirsnapResult<(TemplateRecord, Vec<String>)> {
        let record = self.require(name)?;
        let entries = self.codec.list_entries(&record.template_path)?;
        Ok((record, entries))
    }

    /// Whether a template named `name` exists in the catalog.
    pub fn exists(&self, name: &TemplateName) -> DirsnapResult<bool> {
        self.catalog.exists(name)
    }

    /// Number of stored templates.
    pub fn count(&self) -> DirsnapResult<u64> {
        self.catalog.count()
    }

    /// Delete every template (row + archive), returning how many went.
    ///
    /// Iterates the names actually fetched from the catalog; confirmation
    /// UX belongs to the caller.
    #[instrument(skip_all)]
    pub fn clear(&self) -> DirsnapResult<usize> {
        let records = self.catalog.list_all()?;
        let total = records.len();

        for record in records {
            self.delete(&record.name)?;
        }

        info!(deleted = total, "Catalog cleared");
        Ok(total)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Final archive location for a template name.
    fn archive_path(&self, name: &TemplateName) -> PathBuf {
        self.templates_dir.join(name.archive_file_name())
    }

    /// Fetch a record or fail with `NotFound`.
    fn require(&self, name: &TemplateName) -> DirsnapResult<TemplateRecord> {
        self.catalog.get(name)?.ok_or_else(|| {
            ApplicationError::NotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Best-effort removal of a staged archive after a failed commit.
    fn discard_staged(&self, staged: &Path) {
        if let Err(e) = self.codec.remove(staged) {
            warn!(error = %e, staged = %staged.display(), "Staged archive cleanup failed");
        }
    }
}

/// Staging location for an archive about to be committed: `<dest>.tmp`.
fn staging_path(dest: &Path) -> PathBuf {
    let mut staged = dest.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}

/// Current time as seconds since the Unix epoch.
fn now_epoch() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DirsnapError;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    /// In-memory catalog fake: a locked Vec in insertion order. Clones
    /// share state, so the test keeps a handle after boxing one into the
    /// service.
    #[derive(Default, Clone)]
    struct FakeCatalog {
        rows: Arc<Mutex<Vec<TemplateRecord>>>,
    }

    impl Catalog for FakeCatalog {
        fn exists(&self, name: &TemplateName) -> DirsnapResult<bool> {
            Ok(self.rows.lock().unwrap().iter().any(|r| &r.name == name))
        }

        fn get(&self, name: &TemplateName) -> DirsnapResult<Option<TemplateRecord>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| &r.name == name)
                .cloned())
        }

        fn insert(&self, record: &TemplateRecord) -> DirsnapResult<()> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|r| r.name == record.name) {
                return Err(ApplicationError::AlreadyExists {
                    name: record.name.to_string(),
                }
                .into());
            }
            rows.push(record.clone());
            Ok(())
        }

        fn update(&self, name: &TemplateName, patch: &TemplatePatch) -> DirsnapResult<()> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.iter_mut().find(|r| &r.name == name).ok_or_else(|| {
                DirsnapError::from(ApplicationError::NotFound {
                    name: name.to_string(),
                })
            })?;
            *row = patch.apply(row);
            Ok(())
        }

        fn delete(&self, name: &TemplateName) -> DirsnapResult<()> {
            self.rows.lock().unwrap().retain(|r| &r.name != name);
            Ok(())
        }

        fn list_all(&self) -> DirsnapResult<Vec<TemplateRecord>> {
            Ok(self.rows.lock().unwrap().clone())
        }

        fn count(&self) -> DirsnapResult<u64> {
            Ok(self.rows.lock().unwrap().len() as u64)
        }
    }

    /// Archive codec fake: tracks which archive paths "exist" without
    /// touching the filesystem.
    #[derive(Default, Clone)]
    struct FakeCodec {
        archives: Arc<Mutex<HashSet<PathBuf>>>,
        fail_pack: bool,
    }

    impl FakeCodec {
        fn failing_pack() -> Self {
            Self {
                fail_pack: true,
                ..Default::default()
            }
        }

        fn has(&self, path: &Path) -> bool {
            self.archives.lock().unwrap().contains(path)
        }
    }

    impl ArchiveCodec for FakeCodec {
        fn pack(&self, source_dir: &Path, dest_archive: &Path) -> DirsnapResult<()> {
            if self.fail_pack {
                return Err(ApplicationError::Archive {
                    path: source_dir.into(),
                    reason: "source directory missing".into(),
                }
                .into());
            }
            self.archives.lock().unwrap().insert(dest_archive.into());
            Ok(())
        }

        fn unpack(&self, archive: &Path, _dest_dir: &Path) -> DirsnapResult<()> {
            if !self.has(archive) {
                return Err(ApplicationError::Archive {
                    path: archive.into(),
                    reason: "archive missing".into(),
                }
                .into());
            }
            Ok(())
        }

        fn list_entries(&self, archive: &Path) -> DirsnapResult<Vec<String>> {
            if !self.has(archive) {
                return Err(ApplicationError::Archive {
                    path: archive.into(),
                    reason: "archive missing".into(),
                }
                .into());
            }
            Ok(vec!["src/main.py".into(), "README.md".into()])
        }

        fn promote(&self, staged: &Path, dest: &Path) -> DirsnapResult<()> {
            let mut archives = self.archives.lock().unwrap();
            if !archives.remove(staged) {
                return Err(ApplicationError::Archive {
                    path: staged.into(),
                    reason: "staged archive missing".into(),
                }
                .into());
            }
            archives.insert(dest.into());
            Ok(())
        }

        fn remove(&self, archive: &Path) -> DirsnapResult<()> {
            self.archives.lock().unwrap().remove(archive);
            Ok(())
        }
    }

    fn name(s: &str) -> TemplateName {
        TemplateName::parse(s).unwrap()
    }

    fn service() -> (TemplateService, FakeCatalog, FakeCodec) {
        let catalog = FakeCatalog::default();
        let codec = FakeCodec::default();
        let svc = TemplateService::new(
            Box::new(catalog.clone()),
            Box::new(codec.clone()),
            "/home/templates",
        );
        (svc, catalog, codec)
    }

    // ── snapshot ──────────────────────────────────────────────────────────

    #[test]
    fn snapshot_inserts_row_and_promotes_archive() {
        let (svc, catalog, codec) = service();
        svc.snapshot(&name("proj"), Path::new("/work/proj")).unwrap();

        assert!(catalog.exists(&name("proj")).unwrap());
        assert!(codec.has(Path::new("/home/templates/proj.zip")));
        assert!(!codec.has(Path::new("/home/templates/proj.zip.tmp")));

        let record = catalog.get(&name("proj")).unwrap().unwrap();
        assert_eq!(record.src_path, PathBuf::from("/work/proj"));
        assert_eq!(
            record.template_path,
            PathBuf::from("/home/templates/proj.zip")
        );
        assert!(record.created > 0.0);
    }

    #[test]
    fn snapshot_duplicate_fails_and_keeps_prior_state() {
        let (svc, catalog, codec) = service();
        svc.snapshot(&name("proj"), Path::new("/work/v1")).unwrap();
        let before = catalog.get(&name("proj")).unwrap().unwrap();

        let err = svc
            .snapshot(&name("proj"), Path::new("/work/v2"))
            .unwrap_err();
        assert!(matches!(
            err,
            DirsnapError::Application(ApplicationError::AlreadyExists { .. })
        ));

        // Prior row untouched, final archive still present, staged file gone.
        assert_eq!(catalog.get(&name("proj")).unwrap().unwrap(), before);
        assert!(codec.has(Path::new("/home/templates/proj.zip")));
        assert!(!codec.has(Path::new("/home/templates/proj.zip.tmp")));
    }

    #[test]
    fn snapshot_pack_failure_inserts_nothing() {
        let catalog = FakeCatalog::default();
        let codec = FakeCodec::failing_pack();
        let svc = TemplateService::new(
            Box::new(catalog.clone()),
            Box::new(codec),
            "/home/templates",
        );

        assert!(svc.snapshot(&name("proj"), Path::new("/missing")).is_err());
        assert!(!catalog.exists(&name("proj")).unwrap());
    }

    // ── clone ─────────────────────────────────────────────────────────────

    #[test]
    fn clone_unknown_name_is_not_found() {
        let (svc, _, _) = service();
        let err = svc.clone_to(&name("ghost"), Path::new("/out")).unwrap_err();
        assert!(matches!(
            err,
            DirsnapError::Application(ApplicationError::NotFound { .. })
        ));
    }

    #[test]
    fn clone_missing_archive_fails_lazily() {
        let (svc, _, codec) = service();
        svc.snapshot(&name("proj"), Path::new("/work/proj")).unwrap();

        // Archive file vanishes behind the catalog's back.
        codec.remove(Path::new("/home/templates/proj.zip")).unwrap();

        let err = svc.clone_to(&name("proj"), Path::new("/out")).unwrap_err();
        assert!(matches!(
            err,
            DirsnapError::Application(ApplicationError::Archive { .. })
        ));
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn update_unknown_name_is_not_found() {
        let (svc, _, codec) = service();
        let err = svc.update(&name("ghost"), Path::new("/work")).unwrap_err();
        assert!(matches!(
            err,
            DirsnapError::Application(ApplicationError::NotFound { .. })
        ));
        // NotFound short-circuits before any packing.
        assert!(!codec.has(Path::new("/home/templates/ghost.zip.tmp")));
    }

    #[test]
    fn update_refreshes_timestamp_and_paths() {
        let (svc, catalog, _) = service();
        svc.snapshot(&name("proj"), Path::new("/work/v1")).unwrap();
        let before = catalog.get(&name("proj")).unwrap().unwrap();

        svc.update(&name("proj"), Path::new("/work/v2")).unwrap();
        let after = catalog.get(&name("proj")).unwrap().unwrap();

        assert!(after.created >= before.created);
        assert_eq!(after.src_path, PathBuf::from("/work/v2"));
        assert_eq!(after.template_path, before.template_path);
    }

    // ── delete ────────────────────────────────────────────────────────────

    #[test]
    fn delete_removes_row_and_archive() {
        let (svc, catalog, codec) = service();
        svc.snapshot(&name("proj"), Path::new("/work/proj")).unwrap();

        svc.delete(&name("proj")).unwrap();

        assert!(!catalog.exists(&name("proj")).unwrap());
        assert!(!codec.has(Path::new("/home/templates/proj.zip")));
    }

    #[test]
    fn delete_tolerates_pre_missing_archive() {
        let (svc, catalog, codec) = service();
        svc.snapshot(&name("proj"), Path::new("/work/proj")).unwrap();
        codec.remove(Path::new("/home/templates/proj.zip")).unwrap();

        svc.delete(&name("proj")).unwrap();
        assert!(!catalog.exists(&name("proj")).unwrap());
    }

    #[test]
    fn delete_unknown_name_is_not_found() {
        let (svc, _, _) = service();
        assert!(matches!(
            svc.delete(&name("ghost")).unwrap_err(),
            DirsnapError::Application(ApplicationError::NotFound { .. })
        ));
    }

    // ── listing ───────────────────────────────────────────────────────────

    #[test]
    fn list_all_preserves_insertion_order() {
        let (svc, _, _) = service();
        svc.snapshot(&name("bravo"), Path::new("/b")).unwrap();
        svc.snapshot(&name("alpha"), Path::new("/a")).unwrap();

        let names: Vec<String> = svc
            .list_all()
            .unwrap()
            .iter()
            .map(|r| r.name.to_string())
            .collect();
        assert_eq!(names, vec!["bravo", "alpha"]);
    }

    #[test]
    fn list_files_returns_record_and_entries() {
        let (svc, _, _) = service();
        svc.snapshot(&name("proj"), Path::new("/work/proj")).unwrap();

        let (record, entries) = svc.list_files(&name("proj")).unwrap();
        assert_eq!(record.name, name("proj"));
        assert_eq!(entries, vec!["src/main.py", "README.md"]);
    }

    #[test]
    fn list_files_unknown_name_is_not_found() {
        let (svc, _, _) = service();
        assert!(matches!(
            svc.list_files(&name("ghost")).unwrap_err(),
            DirsnapError::Application(ApplicationError::NotFound { .. })
        ));
    }

    // ── clear ─────────────────────────────────────────────────────────────

    #[test]
    fn clear_deletes_everything_fetched() {
        let (svc, catalog, codec) = service();
        svc.snapshot(&name("one"), Path::new("/1")).unwrap();
        svc.snapshot(&name("two"), Path::new("/2")).unwrap();

        assert_eq!(svc.clear().unwrap(), 2);
        assert_eq!(catalog.count().unwrap(), 0);
        assert!(!codec.has(Path::new("/home/templates/one.zip")));
        assert!(!codec.has(Path::new("/home/templates/two.zip")));
    }

    #[test]
    fn clear_on_empty_catalog_is_zero() {
        let (svc, _, _) = service();
        assert_eq!(svc.clear().unwrap(), 0);
    }
}
