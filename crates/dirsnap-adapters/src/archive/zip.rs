//! Zip archive codec.
//!
//! A template archive is a plain zip file holding a full copy of a
//! directory tree: one entry per file and directory, paths stored relative
//! to the packed root. No metadata beyond names and bytes is guaranteed to
//! round-trip.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::read::ZipArchive;
use zip::write::SimpleFileOptions;

use dirsnap_core::{
    application::{ApplicationError, ports::ArchiveCodec},
    error::{DirsnapError, DirsnapResult},
};

/// Production archive codec backed by the zip format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipCodec;

impl ZipCodec {
    /// Create a new zip codec.
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveCodec for ZipCodec {
    fn pack(&self, source_dir: &Path, dest_archive: &Path) -> DirsnapResult<()> {
        // Reject a missing/non-directory source before touching the
        // destination, so a failed pack never leaves a truncated archive.
        let meta = fs::metadata(source_dir)
            .map_err(|e| map_io_error(source_dir, e, "read source directory"))?;
        if !meta.is_dir() {
            return Err(ApplicationError::Archive {
                path: source_dir.to_path_buf(),
                reason: "source is not a directory".into(),
            }
            .into());
        }

        let file = File::create(dest_archive)
            .map_err(|e| map_io_error(dest_archive, e, "create archive"))?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .compression_level(Some(6));

        let mut entries = 0usize;
        for entry in WalkDir::new(source_dir).min_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::Archive {
                path: source_dir.to_path_buf(),
                reason: format!("walk failed: {e}"),
            })?;

            let rel = entry
                .path()
                .strip_prefix(source_dir)
                .map_err(|e| ApplicationError::Archive {
                    path: entry.path().to_path_buf(),
                    reason: format!("path outside source root: {e}"),
                })?;
            let rel_name = rel.to_string_lossy().replace('\\', "/");

            if entry.file_type().is_dir() {
                zip.add_directory(format!("{rel_name}/"), options)
                    .map_err(|e| map_zip_error(dest_archive, e, "add directory entry"))?;
            } else if entry.file_type().is_file() {
                zip.start_file(rel_name, options)
                    .map_err(|e| map_zip_error(dest_archive, e, "start file entry"))?;
                let mut src = File::open(entry.path())
                    .map_err(|e| map_io_error(entry.path(), e, "read source file"))?;
                io::copy(&mut src, &mut zip)
                    .map_err(|e| map_io_error(entry.path(), e, "copy file into archive"))?;
            }
            // Symlinks and other special files are skipped.
            entries += 1;
        }

        zip.finish()
            .map_err(|e| map_zip_error(dest_archive, e, "finalize archive"))?;

        debug!(entries, archive = %dest_archive.display(), "Packed directory tree");
        Ok(())
    }

    fn unpack(&self, archive: &Path, dest_dir: &Path) -> DirsnapResult<()> {
        fs::create_dir_all(dest_dir)
            .map_err(|e| map_io_error(dest_dir, e, "create destination directory"))?;

        let file = File::open(archive).map_err(|e| map_io_error(archive, e, "open archive"))?;
        let mut zip =
            ZipArchive::new(file).map_err(|e| map_zip_error(archive, e, "read archive"))?;
        zip.extract(dest_dir)
            .map_err(|e| map_zip_error(archive, e, "extract archive"))?;

        debug!(entries = zip.len(), dest = %dest_dir.display(), "Unpacked archive");
        Ok(())
    }

    fn list_entries(&self, archive: &Path) -> DirsnapResult<Vec<String>> {
        let file = File::open(archive).map_err(|e| map_io_error(archive, e, "open archive"))?;
        let mut zip =
            ZipArchive::new(file).map_err(|e| map_zip_error(archive, e, "read archive"))?;

        // file_names() iterates in hash order; index order is the order
        // entries were written.
        let mut names = Vec::with_capacity(zip.len());
        for i in 0..zip.len() {
            let entry = zip
                .by_index(i)
                .map_err(|e| map_zip_error(archive, e, "read archive entry"))?;
            names.push(entry.name().to_string());
        }
        Ok(names)
    }

    fn promote(&self, staged: &Path, dest: &Path) -> DirsnapResult<()> {
        fs::rename(staged, dest).map_err(|e| map_io_error(staged, e, "promote staged archive"))
    }

    fn remove(&self, archive: &Path) -> DirsnapResult<()> {
        match fs::remove_file(archive) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io_error(archive, e, "remove archive")),
        }
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> DirsnapError {
    ApplicationError::Archive {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn map_zip_error(path: &Path, e: zip::result::ZipError, operation: &str) -> DirsnapError {
    ApplicationError::Archive {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_tree(root: &Path) {
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("src/main.py"), "print('hello')\n").unwrap();
        fs::write(root.join("README.md"), "# readme\n").unwrap();
        fs::write(root.join(".env"), "SECRET=1\n").unwrap();
    }

    #[test]
    fn round_trip_preserves_paths_and_bytes() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src_tree");
        let out = dir.path().join("out");
        let archive = dir.path().join("tree.zip");
        write_tree(&src);

        let codec = ZipCodec::new();
        codec.pack(&src, &archive).unwrap();
        codec.unpack(&archive, &out).unwrap();

        assert_eq!(
            fs::read(out.join("src/main.py")).unwrap(),
            fs::read(src.join("src/main.py")).unwrap()
        );
        assert_eq!(
            fs::read(out.join("README.md")).unwrap(),
            fs::read(src.join("README.md")).unwrap()
        );
        // Hidden files and empty directories survive the trip.
        assert!(out.join(".env").is_file());
        assert!(out.join("empty").is_dir());
    }

    #[test]
    fn pack_missing_source_fails_without_creating_archive() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("tree.zip");

        let codec = ZipCodec::new();
        let err = codec
            .pack(&dir.path().join("does-not-exist"), &archive)
            .unwrap_err();
        assert!(matches!(
            err,
            DirsnapError::Application(ApplicationError::Archive { .. })
        ));
        assert!(!archive.exists());
    }

    #[test]
    fn pack_overwrites_existing_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src_tree");
        let archive = dir.path().join("tree.zip");
        write_tree(&src);
        fs::write(&archive, b"not a zip").unwrap();

        let codec = ZipCodec::new();
        codec.pack(&src, &archive).unwrap();
        assert!(codec.list_entries(&archive).unwrap().len() > 1);
    }

    #[test]
    fn list_entries_reports_relative_names() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src_tree");
        let archive = dir.path().join("tree.zip");
        write_tree(&src);

        let codec = ZipCodec::new();
        codec.pack(&src, &archive).unwrap();
        let entries = codec.list_entries(&archive).unwrap();

        assert!(entries.iter().any(|e| e == "src/main.py"));
        assert!(entries.iter().any(|e| e == "README.md"));
        assert!(entries.iter().any(|e| e == "empty/"));
        // No entry leaks the absolute source path.
        assert!(entries.iter().all(|e| !e.starts_with('/')));
    }

    #[test]
    fn unpack_missing_archive_is_an_error() {
        let dir = tempdir().unwrap();
        let codec = ZipCodec::new();
        assert!(
            codec
                .unpack(&dir.path().join("ghost.zip"), dir.path())
                .is_err()
        );
    }

    #[test]
    fn unpack_corrupt_archive_is_an_error() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("bad.zip");
        fs::write(&archive, b"definitely not a zip file").unwrap();

        let codec = ZipCodec::new();
        assert!(codec.unpack(&archive, &dir.path().join("out")).is_err());
    }

    #[test]
    fn promote_renames_staged_file() {
        let dir = tempdir().unwrap();
        let staged = dir.path().join("proj.zip.tmp");
        let dest = dir.path().join("proj.zip");
        fs::write(&staged, b"payload").unwrap();

        let codec = ZipCodec::new();
        codec.promote(&staged, &dest).unwrap();
        assert!(!staged.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"payload");
    }

    #[test]
    fn remove_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let codec = ZipCodec::new();
        codec.remove(&dir.path().join("ghost.zip")).unwrap();
    }
}
