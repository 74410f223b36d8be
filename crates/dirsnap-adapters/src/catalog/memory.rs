//! In-memory catalog adapter for testing.

use std::sync::{Arc, RwLock};

use dirsnap_core::{
    application::{ApplicationError, ports::Catalog},
    domain::{TemplateName, TemplatePatch, TemplateRecord},
    error::{DirsnapError, DirsnapResult},
};

/// Thread-safe in-memory catalog.
///
/// Rows live in a Vec so listing preserves insertion order, matching the
/// rowid ordering of the SQLite adapter. Clones share state — keep one
/// handle for assertions after boxing another into a service.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    inner: Arc<RwLock<Vec<TemplateRecord>>>,
}

impl MemoryCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows (testing helper that cannot fail).
    pub fn len(&self) -> usize {
        self.inner.read().map(|rows| rows.len()).unwrap_or(0)
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> DirsnapResult<std::sync::RwLockReadGuard<'_, Vec<TemplateRecord>>> {
        self.inner.read().map_err(|_| lock_error())
    }

    fn write(&self) -> DirsnapResult<std::sync::RwLockWriteGuard<'_, Vec<TemplateRecord>>> {
        self.inner.write().map_err(|_| lock_error())
    }
}

fn lock_error() -> DirsnapError {
    ApplicationError::Catalog {
        reason: "catalog lock poisoned".into(),
    }
    .into()
}

impl Catalog for MemoryCatalog {
    fn exists(&self, name: &TemplateName) -> DirsnapResult<bool> {
        Ok(self.read()?.iter().any(|r| &r.name == name))
    }

    fn get(&self, name: &TemplateName) -> DirsnapResult<Option<TemplateRecord>> {
        Ok(self.read()?.iter().find(|r| &r.name == name).cloned())
    }

    fn insert(&self, record: &TemplateRecord) -> DirsnapResult<()> {
        let mut rows = self.write()?;
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
        let mut rows = self.write()?;
        let row = rows.iter_mut().find(|r| &r.name == name).ok_or_else(|| {
            DirsnapError::from(ApplicationError::NotFound {
                name: name.to_string(),
            })
        })?;
        *row = patch.apply(row);
        Ok(())
    }

    fn delete(&self, name: &TemplateName) -> DirsnapResult<()> {
        self.write()?.retain(|r| &r.name != name);
        Ok(())
    }

    fn list_all(&self) -> DirsnapResult<Vec<TemplateRecord>> {
        Ok(self.read()?.clone())
    }

    fn count(&self) -> DirsnapResult<u64> {
        Ok(self.read()?.len() as u64)
    }
}
