//! Integration tests: the full template lifecycle over the real adapters.
//!
//! Drives `TemplateService` with `SqliteCatalog` + `ZipCodec` against
//! temporary directories — the same wiring the CLI composition root uses.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use dirsnap_adapters::{SqliteCatalog, ZipCodec};
use dirsnap_core::{
    application::{ApplicationError, TemplateService},
    domain::TemplateName,
    error::DirsnapError,
};

struct Harness {
    service: TemplateService,
    templates_dir: std::path::PathBuf,
    _home: tempfile::TempDir,
}

fn harness() -> Harness {
    let home = tempdir().unwrap();
    let templates_dir = home.path().join("templates");
    fs::create_dir_all(&templates_dir).unwrap();

    let catalog = SqliteCatalog::open(&home.path().join("templates.db")).unwrap();
    let service = TemplateService::new(
        Box::new(catalog),
        Box::new(ZipCodec::new()),
        &templates_dir,
    );

    Harness {
        service,
        templates_dir,
        _home: home,
    }
}

fn name(s: &str) -> TemplateName {
    TemplateName::parse(s).unwrap()
}

fn write_project(root: &Path) {
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/main.py"), "print('hello')\n").unwrap();
    fs::write(root.join("README.md"), "# proj\n").unwrap();
}

#[test]
fn snapshot_then_clone_reproduces_the_tree() {
    let h = harness();
    let work = tempdir().unwrap();
    let src = work.path().join("proj");
    let out = work.path().join("out");
    write_project(&src);

    h.service.snapshot(&name("proj"), &src).unwrap();
    assert!(h.service.exists(&name("proj")).unwrap());
    assert!(h.templates_dir.join("proj.zip").is_file());
    assert!(!h.templates_dir.join("proj.zip.tmp").exists());

    h.service.clone_to(&name("proj"), &out).unwrap();
    assert_eq!(
        fs::read(out.join("src/main.py")).unwrap(),
        fs::read(src.join("src/main.py")).unwrap()
    );
    assert_eq!(
        fs::read(out.join("README.md")).unwrap(),
        fs::read(src.join("README.md")).unwrap()
    );
}

#[test]
fn snapshot_duplicate_name_leaves_prior_archive() {
    let h = harness();
    let work = tempdir().unwrap();
    let src = work.path().join("proj");
    write_project(&src);

    h.service.snapshot(&name("proj"), &src).unwrap();
    let before = fs::read(h.templates_dir.join("proj.zip")).unwrap();

    // Second snapshot from a different tree must change nothing.
    let other = work.path().join("other");
    fs::create_dir_all(&other).unwrap();
    fs::write(other.join("new.txt"), "new").unwrap();

    let err = h.service.snapshot(&name("proj"), &other).unwrap_err();
    assert!(matches!(
        err,
        DirsnapError::Application(ApplicationError::AlreadyExists { .. })
    ));
    assert_eq!(fs::read(h.templates_dir.join("proj.zip")).unwrap(), before);
    assert!(!h.templates_dir.join("proj.zip.tmp").exists());
}

#[test]
fn update_refreshes_contents_and_timestamp() {
    let h = harness();
    let work = tempdir().unwrap();
    let v1 = work.path().join("v1");
    let v2 = work.path().join("v2");
    write_project(&v1);
    fs::create_dir_all(&v2).unwrap();
    fs::write(v2.join("CHANGELOG.md"), "v2\n").unwrap();

    h.service.snapshot(&name("proj"), &v1).unwrap();
    let created_v1 = h.service.list_all().unwrap()[0].created;

    h.service.update(&name("proj"), &v2).unwrap();
    let record = h.service.list_all().unwrap()[0].clone();
    assert!(record.created >= created_v1);
    assert_eq!(record.src_path, v2);

    // Clone now reflects v2, not v1.
    let out = work.path().join("out");
    h.service.clone_to(&name("proj"), &out).unwrap();
    assert!(out.join("CHANGELOG.md").is_file());
    assert!(!out.join("README.md").exists());
}

#[test]
fn delete_removes_row_and_archive_file() {
    let h = harness();
    let work = tempdir().unwrap();
    let src = work.path().join("proj");
    write_project(&src);

    h.service.snapshot(&name("proj"), &src).unwrap();
    h.service.delete(&name("proj")).unwrap();

    assert!(!h.service.exists(&name("proj")).unwrap());
    assert!(!h.templates_dir.join("proj.zip").exists());

    // Subsequent clone fails with NotFound, not an archive error.
    let err = h
        .service
        .clone_to(&name("proj"), work.path())
        .unwrap_err();
    assert!(matches!(
        err,
        DirsnapError::Application(ApplicationError::NotFound { .. })
    ));
}

#[test]
fn delete_unknown_name_changes_nothing() {
    let h = harness();
    let err = h.service.delete(&name("ghost")).unwrap_err();
    assert!(matches!(
        err,
        DirsnapError::Application(ApplicationError::NotFound { .. })
    ));
    assert_eq!(h.service.count().unwrap(), 0);
}

#[test]
fn list_files_reports_archive_entries() {
    let h = harness();
    let work = tempdir().unwrap();
    let src = work.path().join("proj");
    write_project(&src);

    h.service.snapshot(&name("proj"), &src).unwrap();
    let (record, entries) = h.service.list_files(&name("proj")).unwrap();

    assert_eq!(record.name, name("proj"));
    assert!(entries.iter().any(|e| e == "src/main.py"));
    assert!(entries.iter().any(|e| e == "README.md"));
}

#[test]
fn clone_with_missing_archive_fails_lazily() {
    let h = harness();
    let work = tempdir().unwrap();
    let src = work.path().join("proj");
    write_project(&src);

    h.service.snapshot(&name("proj"), &src).unwrap();
    fs::remove_file(h.templates_dir.join("proj.zip")).unwrap();

    // The row still exists; only the clone trips over the missing file.
    assert!(h.service.exists(&name("proj")).unwrap());
    let err = h
        .service
        .clone_to(&name("proj"), work.path())
        .unwrap_err();
    assert!(matches!(
        err,
        DirsnapError::Application(ApplicationError::Archive { .. })
    ));
}

#[test]
fn clear_empties_catalog_and_templates_dir() {
    let h = harness();
    let work = tempdir().unwrap();
    for n in ["one", "two", "three"] {
        let src = work.path().join(n);
        write_project(&src);
        h.service.snapshot(&name(n), &src).unwrap();
    }

    assert_eq!(h.service.clear().unwrap(), 3);
    assert_eq!(h.service.count().unwrap(), 0);
    let leftover: Vec<_> = fs::read_dir(&h.templates_dir).unwrap().collect();
    assert!(leftover.is_empty());
}
