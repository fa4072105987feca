//! Thread-safe handle to a [`TemplateStore`].
//!
//! Every mutating call takes the write lock once and performs its whole
//! read-modify-write inside it, so concurrent edits cannot lose updates.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::EngineResult;
use crate::models::{CompensationTemplate, TemplateParameters, TemplatePatch};

use super::TemplateStore;

/// A cloneable, shared template store.
///
/// # Example
///
/// ```
/// use payroll_engine::store::{SharedTemplateStore, TemplateStore};
///
/// let store = SharedTemplateStore::new(TemplateStore::with_builtin_templates());
/// let handle = store.clone();
///
/// let created = handle.create(None).unwrap();
/// assert!(store.get(&created.id).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SharedTemplateStore {
    inner: Arc<RwLock<TemplateStore>>,
}

impl SharedTemplateStore {
    /// Wraps a store for sharing.
    pub fn new(store: TemplateStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    // A panic while holding the lock cannot leave the store half-updated:
    // every mutation validates before it writes.
    fn read_guard(&self) -> RwLockReadGuard<'_, TemplateStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, TemplateStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs a closure with shared access to the store.
    pub fn read<T>(&self, f: impl FnOnce(&TemplateStore) -> T) -> T {
        f(&self.read_guard())
    }

    /// Runs a closure with exclusive access to the store.
    ///
    /// Use this to combine several operations into one critical section.
    pub fn write<T>(&self, f: impl FnOnce(&mut TemplateStore) -> T) -> T {
        f(&mut self.write_guard())
    }

    /// Returns a snapshot of all templates.
    pub fn list(&self) -> Vec<CompensationTemplate> {
        self.read(|store| store.list().to_vec())
    }

    /// Returns a copy of one template.
    pub fn get(&self, id: &str) -> EngineResult<CompensationTemplate> {
        self.read(|store| store.get(id).cloned())
    }

    /// See [`TemplateStore::create`].
    pub fn create(&self, base: Option<&TemplateParameters>) -> EngineResult<CompensationTemplate> {
        self.write(|store| store.create(base))
    }

    /// See [`TemplateStore::create_named`].
    pub fn create_named(
        &self,
        name: &str,
        base: Option<&TemplateParameters>,
    ) -> EngineResult<CompensationTemplate> {
        self.write(|store| store.create_named(name, base))
    }

    /// See [`TemplateStore::duplicate`].
    pub fn duplicate(&self, id: &str) -> EngineResult<CompensationTemplate> {
        self.write(|store| store.duplicate(id))
    }

    /// See [`TemplateStore::update`].
    pub fn update(&self, id: &str, patch: &TemplatePatch) -> EngineResult<CompensationTemplate> {
        self.write(|store| store.update(id, patch))
    }

    /// Deletes a template and returns it along with the fallback template ID
    /// observed in the same critical section.
    pub fn delete(&self, id: &str) -> EngineResult<(CompensationTemplate, String)> {
        self.write(|store| {
            let removed = store.delete(id)?;
            Ok((removed, store.fallback_template_id().to_string()))
        })
    }
}
