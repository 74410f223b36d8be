//! SQLite catalog adapter.
//!
//! One table keyed by template name, living in a single database file
//! inside the dirsnap home directory. The schema is created on first open,
//! and every mutating statement autocommits — there is no transaction
//! scoping across calls.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use dirsnap_core::{
    application::{ApplicationError, ports::Catalog},
    domain::{TemplateName, TemplatePatch, TemplateRecord},
    error::{DirsnapError, DirsnapResult},
};

/// Catalog schema, applied idempotently on every open.
const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS templates (
    name          TEXT PRIMARY KEY,
    created       REAL,
    src_path      TEXT,
    template_path TEXT
);";

/// Production catalog backed by an embedded SQLite database.
///
/// The connection is owned by this value: the composition root opens it at
/// startup and it closes when the value drops at process exit. The `Mutex`
/// exists only to satisfy the `Send + Sync` port bound — every invocation
/// is single-threaded.
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    /// Open (or create) the catalog database at `db_path` and ensure the
    /// schema exists.
    pub fn open(db_path: &Path) -> DirsnapResult<Self> {
        let conn = Connection::open(db_path).map_err(map_sql_error)?;
        conn.execute_batch(SCHEMA).map_err(map_sql_error)?;

        debug!(db = %db_path.display(), "Catalog opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a throwaway in-memory catalog (tests).
    pub fn open_in_memory() -> DirsnapResult<Self> {
        let conn = Connection::open_in_memory().map_err(map_sql_error)?;
        conn.execute_batch(SCHEMA).map_err(map_sql_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> DirsnapResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            ApplicationError::Catalog {
                reason: "catalog lock poisoned".into(),
            }
            .into()
        })
    }
}

impl Catalog for SqliteCatalog {
    fn exists(&self, name: &TemplateName) -> DirsnapResult<bool> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM templates WHERE name = ?1",
                params![name.as_str()],
                |row| row.get(0),
            )
            .map_err(map_sql_error)?;
        Ok(count > 0)
    }

    fn get(&self, name: &TemplateName) -> DirsnapResult<Option<TemplateRecord>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT name, created, src_path, template_path
                 FROM templates
                 WHERE name = ?1",
                params![name.as_str()],
                row_to_raw,
            )
            .optional()
            .map_err(map_sql_error)?;

        row.map(RawRow::into_record).transpose()
    }

    fn insert(&self, record: &TemplateRecord) -> DirsnapResult<()> {
        let conn = self.lock()?;
        // Single atomic insert: the primary-key constraint is the
        // uniqueness check, not a separate exists() round-trip.
        conn.execute(
            "INSERT INTO templates (name, created, src_path, template_path)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.name.as_str(),
                record.created,
                path_text(&record.src_path),
                path_text(&record.template_path),
            ],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                ApplicationError::AlreadyExists {
                    name: record.name.to_string(),
                }
                .into()
            }
            other => map_sql_error(other),
        })?;
        Ok(())
    }

    fn update(&self, name: &TemplateName, patch: &TemplatePatch) -> DirsnapResult<()> {
        // Fetch-merge-update so omitted patch fields keep their stored
        // value; drops the lock between reads to stay re-entrant.
        let current = self.get(name)?.ok_or_else(|| {
            DirsnapError::from(ApplicationError::NotFound {
                name: name.to_string(),
            })
        })?;
        let merged = patch.apply(&current);

        let conn = self.lock()?;
        conn.execute(
            "UPDATE templates SET
               created = ?1,
               src_path = ?2,
               template_path = ?3
             WHERE name = ?4",
            params![
                merged.created,
                path_text(&merged.src_path),
                path_text(&merged.template_path),
                name.as_str(),
            ],
        )
        .map_err(map_sql_error)?;
        Ok(())
    }

    fn delete(&self, name: &TemplateName) -> DirsnapResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM templates WHERE name = ?1",
            params![name.as_str()],
        )
        .map_err(map_sql_error)?;
        Ok(())
    }

    fn list_all(&self) -> DirsnapResult<Vec<TemplateRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT name, created, src_path, template_path
                 FROM templates
                 ORDER BY rowid",
            )
            .map_err(map_sql_error)?;

        let rows = stmt
            .query_map([], row_to_raw)
            .map_err(map_sql_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_sql_error)?;

        rows.into_iter().map(RawRow::into_record).collect()
    }

    fn count(&self) -> DirsnapResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM templates", [], |row| row.get(0))
            .map_err(map_sql_error)?;
        Ok(count as u64)
    }
}

// ── row mapping ───────────────────────────────────────────────────────────────

/// Raw column values before domain validation.
struct RawRow {
    name: String,
    created: f64,
    src_path: String,
    template_path: String,
}

impl RawRow {
    /// Stored names were normalized on the way in, so re-parsing only
    /// fails on a hand-edited database file.
    fn into_record(self) -> DirsnapResult<TemplateRecord> {
        let name = TemplateName::parse(&self.name)?;
        Ok(TemplateRecord::new(
            name,
            self.created,
            PathBuf::from(self.src_path),
            PathBuf::from(self.template_path),
        ))
    }
}

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        name: row.get(0)?,
        created: row.get(1)?,
        src_path: row.get(2)?,
        template_path: row.get(3)?,
    })
}

fn path_text(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn map_sql_error(e: rusqlite::Error) -> DirsnapError {
    ApplicationError::Catalog {
        reason: e.to_string(),
    }
    .into()
}

// ── tests ─────────────────────────────────────────────────────────────────────
